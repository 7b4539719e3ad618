//! # Error Types
//!
//! Domain-level error types for libreria-core.
//!
//! ## Error Hierarchy
//! ```text
//!   libreria-core errors (this file)
//!   └── ValidationError  - input validation failures
//!
//!   libreria-db errors (separate crate)
//!   └── DbError          - storage failures, not-found, stock, integrity
//!
//!   app errors
//!   └── ApiError         - what the admin HTTP surface returns
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impls)
//! 2. Include context in error messages (field, id, limits)
//! 3. Errors are enum variants, never bare strings

use thiserror::Error;

/// Input validation errors.
///
/// These occur when user input does not meet the domain rules, before any
/// storage work starts. The storage layer wraps them into its own error type
/// so callers see a single taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long for its column.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive (quantities).
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative (stock levels, prices).
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value is outside the allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (malformed ISBN, email, money amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a `Required` error for the given field name.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an `InvalidFormat` error with a reason.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::required("title");
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::invalid_format("isbn", "must be 13 characters");
        assert_eq!(
            err.to_string(),
            "isbn has invalid format: must be 13 characters"
        );
    }
}
