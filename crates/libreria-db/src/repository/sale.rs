//! # Sale Repository
//!
//! Database operations for sales and their line items, including the stock
//! bookkeeping that makes this the one repository with more than one
//! invariant to hold.
//!
//! ## Units of Work
//! ```text
//!   create(customer, items, user?)
//!     └── one transaction: validate each book/quantity against current
//!         stock, decrement stocks, snapshot unit prices, insert header +
//!         items, total = Σ(qty × unit price). All or nothing.
//!
//!   update(sale_id, items)
//!     └── one transaction, two phases: restore stock from the recorded
//!         items, then re-validate and apply the new set against the
//!         RESTORED levels. A failure in phase two rolls phase one back.
//!
//!   delete(sale_id)
//!     └── one transaction: restore stock, delete header (items cascade).
//! ```
//!
//! Dropping an uncommitted `sqlx` transaction rolls it back, so every
//! early `?` return leaves the database untouched.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use libreria_core::validation::validate_order_line;
use libreria_core::{
    BillingSummary, InvoiceLine, OrderLine, Sale, SaleItem, SaleWithItems, ValidationError,
    MAX_NAME_LEN,
};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

const SALE_COLUMNS: &str = "id, user_id, customer_name, total_cents, created_at";
const ITEM_COLUMNS: &str = "id, sale_id, book_id, quantity, unit_price_cents, line_total_cents";

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Creates a sale with its line items in a single transaction.
    ///
    /// Duplicate book ids in the request are aggregated before validation,
    /// so `[(1, 2), (1, 3)]` behaves as `[(1, 5)]`.
    ///
    /// ## Errors
    /// * `DbError::Validation` - a quantity is zero or negative
    /// * `DbError::NotFound` - a book (or the user) does not exist
    /// * `DbError::InsufficientStock` - a quantity exceeds current stock
    ///
    /// Any error leaves stock levels and the sales tables unchanged.
    pub async fn create(
        &self,
        customer_name: Option<&str>,
        items: &[OrderLine],
        user_id: Option<i64>,
    ) -> DbResult<SaleWithItems> {
        let customer_name = normalize_customer(customer_name)?;
        let lines = aggregate_lines(items)?;

        debug!(customer = ?customer_name, lines = lines.len(), "creating sale");

        let mut tx = self.pool.begin().await?;

        if let Some(uid) = user_id {
            let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?1")
                .bind(uid)
                .fetch_optional(&mut *tx)
                .await?;
            if exists.is_none() {
                return Err(DbError::not_found("User", uid));
            }
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO sales (user_id, customer_name, total_cents, created_at)
            VALUES (?1, ?2, 0, ?3)
            "#,
        )
        .bind(user_id)
        .bind(customer_name.as_deref())
        .bind(now)
        .execute(&mut *tx)
        .await?;
        let sale_id = result.last_insert_rowid();

        let total_cents = apply_lines(&mut tx, sale_id, &lines).await?;

        sqlx::query("UPDATE sales SET total_cents = ?2 WHERE id = ?1")
            .bind(sale_id)
            .bind(total_cents)
            .execute(&mut *tx)
            .await?;

        let sale = fetch_sale_tx(&mut tx, sale_id).await?;
        let items = fetch_items_tx(&mut tx, sale_id).await?;
        tx.commit().await?;

        debug!(sale_id, total_cents, "sale created");
        Ok(SaleWithItems { sale, items })
    }

    /// Replaces a sale's line items, reconciling stock.
    ///
    /// Phase one restores stock for every recorded item; phase two
    /// validates the new items against the restored levels and applies
    /// them. Both phases share one transaction, so a phase-two failure
    /// rolls the restoration back and the sale keeps its original state.
    ///
    /// Returns `None` when the sale id does not exist.
    pub async fn update(
        &self,
        sale_id: i64,
        items: &[OrderLine],
    ) -> DbResult<Option<SaleWithItems>> {
        let lines = aggregate_lines(items)?;

        debug!(sale_id, lines = lines.len(), "updating sale items");

        let mut tx = self.pool.begin().await?;

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM sales WHERE id = ?1")
            .bind(sale_id)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_none() {
            return Ok(None);
        }

        restore_stock_tx(&mut tx, sale_id).await?;
        sqlx::query("DELETE FROM sale_items WHERE sale_id = ?1")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        let total_cents = apply_lines(&mut tx, sale_id, &lines).await?;

        sqlx::query("UPDATE sales SET total_cents = ?2 WHERE id = ?1")
            .bind(sale_id)
            .bind(total_cents)
            .execute(&mut *tx)
            .await?;

        let sale = fetch_sale_tx(&mut tx, sale_id).await?;
        let items = fetch_items_tx(&mut tx, sale_id).await?;
        tx.commit().await?;

        debug!(sale_id, total_cents, "sale updated");
        Ok(Some(SaleWithItems { sale, items }))
    }

    /// Deletes a sale, restoring the stock its line items held.
    ///
    /// Restoration keeps delete symmetric with [`SaleRepository::update`];
    /// the line items themselves go with the header via the engine's
    /// cascade rule. Returns `false` when the id does not exist.
    pub async fn delete(&self, sale_id: i64) -> DbResult<bool> {
        debug!(sale_id, "deleting sale");

        let mut tx = self.pool.begin().await?;

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM sales WHERE id = ?1")
            .bind(sale_id)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_none() {
            return Ok(false);
        }

        restore_stock_tx(&mut tx, sale_id).await?;

        sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Gets a sale with its items. Read-only, no side effects.
    pub async fn get(&self, sale_id: i64) -> DbResult<Option<SaleWithItems>> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"
        ))
        .bind(sale_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(sale) = sale else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, SaleItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM sale_items WHERE sale_id = ?1 ORDER BY id"
        ))
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(SaleWithItems { sale, items }))
    }

    /// Lists all sales, most recent first.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Returns the invoice lines for a sale: items joined with book titles,
    /// in item order. Feeds `libreria_core::invoice::render_invoice`.
    pub async fn invoice_lines(&self, sale_id: i64) -> DbResult<Vec<InvoiceLine>> {
        let lines = sqlx::query_as::<_, InvoiceLine>(
            r#"
            SELECT b.title AS title,
                   si.quantity AS quantity,
                   si.unit_price_cents AS unit_price_cents,
                   si.line_total_cents AS line_total_cents
            FROM sale_items si
            INNER JOIN books b ON b.id = si.book_id
            WHERE si.sale_id = ?1
            ORDER BY si.id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Aggregates billed total and sale count since a point in time.
    pub async fn billing_summary(&self, since: DateTime<Utc>) -> DbResult<BillingSummary> {
        let summary = sqlx::query_as::<_, BillingSummary>(
            r#"
            SELECT COALESCE(SUM(total_cents), 0) AS total_cents,
                   COUNT(*) AS sales
            FROM sales
            WHERE created_at >= ?1
            "#,
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}

// =============================================================================
// Transaction helpers
// =============================================================================

/// Validates and applies order lines inside an open transaction:
/// checks stock, decrements it, inserts the line items with the unit price
/// snapshotted from the book. Returns the computed total in cents.
async fn apply_lines(
    tx: &mut Transaction<'_, Sqlite>,
    sale_id: i64,
    lines: &[OrderLine],
) -> DbResult<i64> {
    let now = Utc::now();
    let mut total_cents: i64 = 0;

    for line in lines {
        let book: Option<(i64, i64)> =
            sqlx::query_as("SELECT stock, price_cents FROM books WHERE id = ?1")
                .bind(line.book_id)
                .fetch_optional(&mut **tx)
                .await?;

        let (stock, price_cents) = match book {
            Some(row) => row,
            None => return Err(DbError::not_found("Book", line.book_id)),
        };

        if stock < line.quantity {
            return Err(DbError::InsufficientStock {
                book_id: line.book_id,
                available: stock,
                requested: line.quantity,
            });
        }

        sqlx::query("UPDATE books SET stock = stock - ?2, updated_at = ?3 WHERE id = ?1")
            .bind(line.book_id)
            .bind(line.quantity)
            .bind(now)
            .execute(&mut **tx)
            .await?;

        let line_total = price_cents * line.quantity;
        sqlx::query(
            r#"
            INSERT INTO sale_items (sale_id, book_id, quantity, unit_price_cents, line_total_cents)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(sale_id)
        .bind(line.book_id)
        .bind(line.quantity)
        .bind(price_cents)
        .bind(line_total)
        .execute(&mut **tx)
        .await?;

        total_cents += line_total;
    }

    Ok(total_cents)
}

/// Adds each recorded line item's quantity back to its book's stock.
async fn restore_stock_tx(tx: &mut Transaction<'_, Sqlite>, sale_id: i64) -> DbResult<()> {
    let now = Utc::now();
    sqlx::query(
        r#"
        UPDATE books
        SET stock = stock + (
                SELECT si.quantity FROM sale_items si
                WHERE si.sale_id = ?1 AND si.book_id = books.id
            ),
            updated_at = ?2
        WHERE id IN (SELECT book_id FROM sale_items WHERE sale_id = ?1)
        "#,
    )
    .bind(sale_id)
    .bind(now)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn fetch_sale_tx(tx: &mut Transaction<'_, Sqlite>, sale_id: i64) -> DbResult<Sale> {
    let sale = sqlx::query_as::<_, Sale>(&format!(
        "SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"
    ))
    .bind(sale_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(sale)
}

async fn fetch_items_tx(
    tx: &mut Transaction<'_, Sqlite>,
    sale_id: i64,
) -> DbResult<Vec<SaleItem>> {
    let items = sqlx::query_as::<_, SaleItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM sale_items WHERE sale_id = ?1 ORDER BY id"
    ))
    .bind(sale_id)
    .fetch_all(&mut **tx)
    .await?;
    Ok(items)
}

// =============================================================================
// Input normalization
// =============================================================================

/// Validates quantities and merges duplicate book ids, preserving the
/// order of first occurrence. A sale needs at least one line.
fn aggregate_lines(items: &[OrderLine]) -> DbResult<Vec<OrderLine>> {
    if items.is_empty() {
        return Err(ValidationError::required("items").into());
    }
    let mut merged: Vec<OrderLine> = Vec::with_capacity(items.len());
    for line in items {
        validate_order_line(line)?;
        match merged.iter_mut().find(|l| l.book_id == line.book_id) {
            Some(existing) => existing.quantity += line.quantity,
            None => merged.push(*line),
        }
    }
    Ok(merged)
}

fn normalize_customer(customer: Option<&str>) -> DbResult<Option<String>> {
    match customer.map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) if name.len() > MAX_NAME_LEN => Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: MAX_NAME_LEN,
        }
        .into()),
        Some(name) => Ok(Some(name.to_string())),
    }
}
