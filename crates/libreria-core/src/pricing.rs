//! # Pricing Helpers
//!
//! Percentage-based discount on a price. Callers add their own business
//! rules on top (minimum price, stacking).

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

/// Applies a percentage discount to a price, rounding to the nearest cent.
///
/// The percentage must lie in `[0, 100]`; the price must not be negative.
///
/// ```rust
/// use libreria_core::money::Money;
/// use libreria_core::pricing::apply_discount;
///
/// let price = Money::from_cents(2000);
/// assert_eq!(apply_discount(price, 10.0).unwrap().cents(), 1800);
/// ```
pub fn apply_discount(price: Money, percent: f64) -> ValidationResult<Money> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(price.scale(discount_factor(percent)?))
}

/// Converts a percentage in `[0, 100]` into the multiplier a bulk price
/// update applies (10% off becomes 0.9).
pub fn discount_factor(percent: f64) -> ValidationResult<f64> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "discount percent".to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(1.0 - percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_discount() {
        assert_eq!(
            apply_discount(Money::from_cents(1000), 25.0).unwrap().cents(),
            750
        );
        // rounds to the nearest cent: 999 * 0.9 = 899.1
        assert_eq!(
            apply_discount(Money::from_cents(999), 10.0).unwrap().cents(),
            899
        );
    }

    #[test]
    fn test_edge_percentages() {
        let p = Money::from_cents(500);
        assert_eq!(apply_discount(p, 0.0).unwrap(), p);
        assert_eq!(apply_discount(p, 100.0).unwrap(), Money::zero());
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(apply_discount(Money::from_cents(-1), 10.0).is_err());
        assert!(apply_discount(Money::from_cents(100), -5.0).is_err());
        assert!(apply_discount(Money::from_cents(100), 120.0).is_err());
    }

    #[test]
    fn test_discount_factor() {
        assert_eq!(discount_factor(10.0).unwrap(), 0.9);
        assert_eq!(discount_factor(0.0).unwrap(), 1.0);
        assert!(discount_factor(101.0).is_err());
    }
}
