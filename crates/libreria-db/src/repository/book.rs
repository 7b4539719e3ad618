//! # Book Repository
//!
//! Database operations for the book catalog.
//!
//! ## Key Operations
//! - CRUD with engine-backed constraints (unique ISBN, stock >= 0)
//! - absolute stock updates (sales go through the sale repository)
//! - bulk price updates over a filter, by fixed price or factor

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use libreria_core::validation::{validate_new_book, validate_price, validate_stock};
use libreria_core::{Book, Money, NewBook};

/// Filter for bulk price updates. Empty filter matches every book;
/// populated fields are ANDed together.
#[derive(Debug, Clone, Default)]
pub struct PriceFilter {
    /// Exact author match.
    pub author: Option<String>,
    /// Explicit id set. `Some(vec![])` matches nothing.
    pub ids: Option<Vec<i64>>,
    /// Inclusive lower bound on the current price.
    pub min_price: Option<Money>,
    /// Inclusive upper bound on the current price.
    pub max_price: Option<Money>,
}

/// How matched prices change: replaced outright, or scaled by a factor
/// (rounded to the nearest cent in SQL).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceChange {
    Set(Money),
    Factor(f64),
}

/// Repository for book database operations.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

const BOOK_COLUMNS: &str =
    "id, title, author, isbn, stock, price_cents, created_at, updated_at";

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Inserts a new book after validating its fields.
    ///
    /// ## Errors
    /// * `DbError::Validation` - missing title/author, malformed isbn,
    ///   negative stock or price
    /// * `DbError::UniqueViolation` - isbn already exists
    pub async fn insert(&self, book: &NewBook) -> DbResult<Book> {
        validate_new_book(book)?;

        let now = Utc::now();
        let isbn = book.isbn.as_deref().map(str::trim);

        debug!(title = %book.title, author = %book.author, "inserting book");

        let result = sqlx::query(
            r#"
            INSERT INTO books (title, author, isbn, stock, price_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
        )
        .bind(book.title.trim())
        .bind(book.author.trim())
        .bind(isbn)
        .bind(book.stock)
        .bind(book.price_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Book", id))
    }

    /// Returns all books in insertion (id) order.
    pub async fn list(&self) -> DbResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Gets a book by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Sets a book's stock to an absolute level.
    ///
    /// Returns the updated book, or `None` when the id is absent.
    /// Stock decrements for sales do NOT go through here; the sale
    /// repository owns those inside its own transactions.
    pub async fn update_stock(&self, id: i64, new_stock: i64) -> DbResult<Option<Book>> {
        validate_stock(new_stock)?;

        debug!(id, new_stock, "updating book stock");

        let result = sqlx::query(
            "UPDATE books SET stock = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(new_stock)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Deletes a book by id.
    ///
    /// Returns `false` when the id does not exist. Fails with
    /// `DbError::ForeignKeyViolation` while sale line items still
    /// reference the book (engine RESTRICT rule).
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        debug!(id, "deleting book");

        let result = sqlx::query("DELETE FROM books WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Bulk-updates prices for every book matching the filter.
    ///
    /// Returns the number of affected rows. A factor change rounds to the
    /// nearest cent in SQL, so the count and the arithmetic happen in one
    /// statement - one unit of work, no read-modify-write loop.
    pub async fn bulk_update_price(
        &self,
        filter: &PriceFilter,
        change: PriceChange,
    ) -> DbResult<u64> {
        match change {
            PriceChange::Set(price) => validate_price(price.cents())?,
            PriceChange::Factor(factor) => {
                if !factor.is_finite() || factor <= 0.0 {
                    return Err(libreria_core::ValidationError::MustBePositive {
                        field: "factor".to_string(),
                    }
                    .into());
                }
            }
        }
        if let Some(ids) = &filter.ids {
            if ids.is_empty() {
                return Ok(0);
            }
        }

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE books SET price_cents = ");
        match change {
            PriceChange::Set(price) => {
                qb.push_bind(price.cents());
            }
            PriceChange::Factor(factor) => {
                qb.push("CAST(ROUND(price_cents * ");
                qb.push_bind(factor);
                qb.push(") AS INTEGER)");
            }
        }
        qb.push(", updated_at = ");
        qb.push_bind(Utc::now());
        qb.push(" WHERE 1 = 1");

        if let Some(author) = &filter.author {
            qb.push(" AND author = ");
            qb.push_bind(author.clone());
        }
        if let Some(ids) = &filter.ids {
            qb.push(" AND id IN (");
            let mut sep = qb.separated(", ");
            for id in ids {
                sep.push_bind(*id);
            }
            sep.push_unseparated(")");
        }
        if let Some(min) = filter.min_price {
            qb.push(" AND price_cents >= ");
            qb.push_bind(min.cents());
        }
        if let Some(max) = filter.max_price {
            qb.push(" AND price_cents <= ");
            qb.push_bind(max.cents());
        }

        let result = qb.build().execute(&self.pool).await?;

        debug!(affected = result.rows_affected(), "bulk price update");
        Ok(result.rows_affected())
    }

    /// Counts books, for diagnostics.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
