//! # Validation Module
//!
//! Field-level validation rules, applied by the repositories before any
//! storage work starts.
//!
//! ## Validation Layers
//! ```text
//!   Layer 1: CLI / admin API    argument parsing, type checks
//!   Layer 2: THIS MODULE        domain rules (required fields, ranges)
//!   Layer 3: SQLite             NOT NULL, UNIQUE, CHECK, foreign keys
//! ```
//! The engine constraints back up the rules here; nothing relies on a
//! single layer catching a bad value.

use crate::error::{ValidationError, ValidationResult};
use crate::types::{NewBook, NewUser, OrderLine};
use crate::{ISBN_LEN, MAX_NAME_LEN, MAX_TITLE_LEN};

/// Validates a book title: required, bounded by the column width.
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::required("title"));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }
    Ok(())
}

/// Validates an author name: required, bounded.
pub fn validate_author(author: &str) -> ValidationResult<()> {
    let author = author.trim();
    if author.is_empty() {
        return Err(ValidationError::required("author"));
    }
    if author.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "author".to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validates an ISBN-13: exactly 13 characters, digits with an optional
/// trailing `X`. Only called when an ISBN is present; the field itself is
/// optional.
pub fn validate_isbn(isbn: &str) -> ValidationResult<()> {
    let isbn = isbn.trim();
    if isbn.len() != ISBN_LEN {
        return Err(ValidationError::invalid_format(
            "isbn",
            format!("must be {ISBN_LEN} characters"),
        ));
    }
    let digits_ok = isbn
        .chars()
        .enumerate()
        .all(|(i, c)| c.is_ascii_digit() || (c == 'X' && i == ISBN_LEN - 1));
    if !digits_ok {
        return Err(ValidationError::invalid_format(
            "isbn",
            "must contain only digits (trailing X allowed)",
        ));
    }
    Ok(())
}

/// Validates a stock level: zero or more.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }
    Ok(())
}

/// Validates a price in cents: zero or more.
pub fn validate_price(price_cents: i64) -> ValidationResult<()> {
    if price_cents < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a requested order line: quantity strictly positive.
pub fn validate_order_line(line: &OrderLine) -> ValidationResult<()> {
    if line.quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: format!("quantity for book {}", line.book_id),
        });
    }
    Ok(())
}

/// Validates a user name: required, bounded.
pub fn validate_user_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validates an email address. Deliberately shallow: a non-empty value
/// with one `@` somewhere in the middle. Full RFC checks belong to a
/// mail-sending layer this system does not have.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }
    if email.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_NAME_LEN,
        });
    }
    let mid = email.split('@').count() == 2
        && !email.starts_with('@')
        && !email.ends_with('@');
    if !mid {
        return Err(ValidationError::invalid_format(
            "email",
            "expected name@domain",
        ));
    }
    Ok(())
}

/// Validates all fields of a new book in one pass.
pub fn validate_new_book(book: &NewBook) -> ValidationResult<()> {
    validate_title(&book.title)?;
    validate_author(&book.author)?;
    if let Some(isbn) = &book.isbn {
        validate_isbn(isbn)?;
    }
    validate_stock(book.stock)?;
    validate_price(book.price_cents)?;
    Ok(())
}

/// Validates all fields of a new user in one pass.
pub fn validate_new_user(user: &NewUser) -> ValidationResult<()> {
    validate_user_name(&user.name)?;
    validate_email(&user.email)?;
    Ok(())
}
