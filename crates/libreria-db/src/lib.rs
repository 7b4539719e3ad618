//! # libreria-db: Storage Layer for the Bookstore Backend
//!
//! SQLite access via `sqlx`: connection pool, embedded migrations, and one
//! repository per entity family.
//!
//! ## Module Organization
//!
//! - [`pool`] - connection pool creation and the [`Database`] handle
//! - [`migrations`] - embedded database migrations
//! - [`settings`] - environment-variable mapping to a [`DbConfig`]
//! - [`error`] - storage error taxonomy
//! - [`repository`] - book, sale and user repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use libreria_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./libreria.db")).await?;
//! let books = db.books().list().await?;
//! let sale = db.sales().create(Some("Cliente Demo"), &items, None).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod settings;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use settings::DbSettings;

// Repository re-exports for convenience
pub use repository::book::{BookRepository, PriceChange, PriceFilter};
pub use repository::sale::SaleRepository;
pub use repository::user::UserRepository;
