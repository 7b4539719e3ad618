//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//!   In floating point:      0.1 + 0.2 = 0.30000000000000004   WRONG!
//!   With integer cents:     10 + 20 = 30 cents                exact
//! ```
//! Prices travel as integer cents through the database, the repositories
//! and the API; only presentation code turns them into "12.50".
//!
//! ## Usage
//! ```rust
//! use libreria_core::money::Money;
//!
//! let price = Money::from_cents(1250); // 12.50
//! let total = price * 3;
//! assert_eq!(total.cents(), 3750);
//! assert_eq!(total.to_string(), "37.50");
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for corrections
/// - **Single-field tuple struct**: zero-cost abstraction over i64
/// - **serde(transparent)**: serializes as a plain integer in JSON
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks whether the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Scales the value by a factor, rounding half away from zero to the
    /// nearest cent. Used for bulk price updates and discounts.
    ///
    /// ```rust
    /// use libreria_core::money::Money;
    ///
    /// let price = Money::from_cents(999);
    /// assert_eq!(price.scale(1.1).cents(), 1099);
    /// ```
    pub fn scale(&self, factor: f64) -> Self {
        Money((self.0 as f64 * factor).round() as i64)
    }

    /// Formats the value with a currency symbol, e.g. `€12.50`.
    pub fn display_with(&self, symbol: &str) -> String {
        format!("{symbol}{self}")
    }
}

/// Renders as `major.minor` with two decimal places, e.g. `12.50` or `-3.07`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}{}.{:02}", self.major().abs(), self.minor())
    }
}

/// Parses a decimal amount like `12.50`, `9.99` or `3` into cents.
///
/// Rejects more than two decimal places; this is money, not measurement.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = |reason: &str| ValidationError::invalid_format("amount", reason);

        let (sign, digits) = match s.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, s),
        };
        if digits.is_empty() {
            return Err(bad("empty amount"));
        }

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((m, f)) => (m, f),
            None => (digits, ""),
        };
        if minor_str.len() > 2 {
            return Err(bad("at most two decimal places"));
        }
        if !major_str.chars().all(|c| c.is_ascii_digit())
            || !minor_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(bad("expected a decimal number like 12.50"));
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str.parse().map_err(|_| bad("amount too large"))?
        };
        // "12.5" means 12.50, not 12.05
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| bad("bad cents"))? * 10,
            _ => minor_str.parse().map_err(|_| bad("bad cents"))?,
        };

        Ok(Money(sign * (major * 100 + minor)))
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Mul<i64> for Money {
    type Output = Money;
    fn mul(self, qty: i64) -> Money {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}
