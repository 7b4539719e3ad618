//! # Repository Module
//!
//! Repository implementations for the bookstore backend.
//!
//! ## Repository Pattern
//! ```text
//!   CLI / admin API
//!        │   db.sales().create(...)
//!        ▼
//!   SaleRepository            one unit of work per call:
//!   BookRepository            open transaction, execute, commit,
//!   UserRepository            roll back + surface DbError on failure
//!        │
//!        ▼
//!   SQLite
//! ```
//!
//! The presentation layers never open transactions or retry; that
//! discipline lives here exclusively.
//!
//! ## Available Repositories
//!
//! - [`book::BookRepository`] - catalog CRUD, stock updates, bulk pricing
//! - [`sale::SaleRepository`] - sales with stock reconciliation
//! - [`user::UserRepository`] - user CRUD

pub mod book;
pub mod sale;
pub mod user;
