//! # Database Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//!   SQLite error (sqlx::Error)
//!        │
//!        ▼
//!   DbError (this module)     adds context and categorization
//!        │
//!        ▼
//!   CLI message / ApiError    user-facing translation only
//! ```
//!
//! One taxonomy for every caller: validation, not-found, insufficient
//! stock, referential integrity, connectivity. Repositories roll back the
//! active transaction before surfacing any of these; nothing is swallowed.

use thiserror::Error;

use libreria_core::ValidationError;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found by id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Requested quantity exceeds the book's current stock.
    #[error("insufficient stock for book {book_id}: available {available}, requested {requested}")]
    InsufficientStock {
        book_id: i64,
        available: i64,
        requested: i64,
    },

    /// Input failed a domain rule before any storage work.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unique constraint violation (duplicate ISBN).
    #[error("duplicate {field}: already exists")]
    UniqueViolation { field: String },

    /// Delete blocked (or reference broken) by a foreign key constraint,
    /// e.g. removing a book that sale line items still reference.
    #[error("referential integrity violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Storage engine unreachable or the pool is closed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// All pooled connections are in use.
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Migration failed.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Anything else from the driver.
    #[error("internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// SQLite reports constraint failures only through the message text:
/// `UNIQUE constraint failed: <table>.<column>` and
/// `FOREIGN KEY constraint failed`.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation { field }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type DbResult<T> = Result<T, DbError>;
