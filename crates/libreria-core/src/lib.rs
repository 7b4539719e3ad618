//! # libreria-core: Pure Domain Logic for the Bookstore Backend
//!
//! This crate is the heart of the system. It contains the domain types and
//! business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//!   apps/cli, apps/admin          presentation (clap / axum)
//!          │
//!          ▼
//!   libreria-db                   SQLite queries, migrations, repositories
//!          │
//!          ▼
//!   libreria-core (THIS CRATE)    entities, Money, validation, invoices
//!                                 NO I/O - NO DATABASE - PURE FUNCTIONS
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Book, User, Sale, SaleItem, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validation rules
//! - [`invoice`] - Text invoice rendering for a sale
//! - [`pricing`] - Discount helpers
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic
//! 2. **No I/O**: database, network and file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

pub mod error;
pub mod invoice;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// Re-exports for convenience: `use libreria_core::Money` instead of
// `use libreria_core::money::Money`.
pub use error::ValidationError;
pub use money::Money;
pub use types::*;

/// Maximum length of a book title (mirrors the column width).
pub const MAX_TITLE_LEN: usize = 255;

/// Maximum length of an author, user or customer name.
pub const MAX_NAME_LEN: usize = 100;

/// Length of a normalized ISBN-13.
pub const ISBN_LEN: usize = 13;
