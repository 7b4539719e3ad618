//! # Domain Types
//!
//! Core domain entities used throughout the bookstore backend.
//!
//! ## Entity Relationships
//! ```text
//!   ┌──────────┐      ┌──────────┐      ┌────────────┐      ┌──────────┐
//!   │   User   │◄─────│   Sale   │─────►│  SaleItem  │─────►│   Book   │
//!   │──────────│ 0..1 │──────────│ 1..* │────────────│  1   │──────────│
//!   │ id       │      │ id       │      │ id         │      │ id       │
//!   │ name     │      │ customer │      │ quantity   │      │ title    │
//!   │ email    │      │ total    │      │ unit_price │      │ author   │
//!   └──────────┘      │ created  │      │ (snapshot) │      │ isbn     │
//!                     └──────────┘      └────────────┘      │ stock    │
//!                                                           │ price    │
//!                                                           └──────────┘
//! ```
//!
//! ## Price Snapshot Pattern
//! A sale item records `unit_price_cents` at the moment the sale is made,
//! so `sale.total` stays consistent with history even when book prices
//! change later.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Book
// =============================================================================

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Book {
    /// Surrogate primary key.
    pub id: i64,

    /// Title, required.
    pub title: String,

    /// Author, required.
    pub author: String,

    /// ISBN-13, unique when present.
    pub isbn: Option<String>,

    /// Units in inventory, never negative.
    pub stock: i64,

    /// Unit price in cents.
    pub price_cents: i64,

    /// When the book was created.
    pub created_at: DateTime<Utc>,

    /// When the book was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Returns the price as a Money value.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Input for creating a book. The id and timestamps are storage-assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub stock: i64,
    pub price_cents: i64,
}

// =============================================================================
// User
// =============================================================================

/// An application user who may own sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

// =============================================================================
// Sale
// =============================================================================

/// Sale header. The total is derived from the line items, never set
/// directly by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,

    /// Optional owning user; NULL survives user deletion.
    pub user_id: Option<i64>,

    pub customer_name: Option<String>,

    /// Computed as sum(quantity * unit_price_cents) over current items.
    pub total_cents: i64,

    /// Set at creation, immutable afterwards.
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the sale total as a Money value.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// One (book, quantity) line within a sale, with the unit price captured
/// at the time of the sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    pub book_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl SaleItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

/// A sale header together with its line items, ordered by item id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleWithItems {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

// =============================================================================
// Order input
// =============================================================================

/// A requested (book, quantity) pair when creating or updating a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub book_id: i64,
    pub quantity: i64,
}

impl OrderLine {
    pub const fn new(book_id: i64, quantity: i64) -> Self {
        OrderLine { book_id, quantity }
    }
}

/// Parses the CLI shorthand `book_id:quantity`, e.g. `3:2`.
impl FromStr for OrderLine {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || {
            ValidationError::invalid_format("item", "expected book_id:quantity, e.g. 1:2")
        };
        let (id, qty) = s.split_once(':').ok_or_else(bad)?;
        Ok(OrderLine {
            book_id: id.trim().parse().map_err(|_| bad())?,
            quantity: qty.trim().parse().map_err(|_| bad())?,
        })
    }
}

// =============================================================================
// Reporting
// =============================================================================

/// One rendered invoice line: the book title joined onto a sale item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InvoiceLine {
    pub title: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl InvoiceLine {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

/// Aggregated billing over a reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BillingSummary {
    pub total_cents: i64,
    pub sales: i64,
}

/// Reporting window for billing summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Monthly,
    Quarterly,
    Annual,
}

impl ReportPeriod {
    /// Window length in days (30/90/365, matching the reporting service).
    pub const fn days(&self) -> i64 {
        match self {
            ReportPeriod::Monthly => 30,
            ReportPeriod::Quarterly => 90,
            ReportPeriod::Annual => 365,
        }
    }
}

/// Accepts the established Spanish period names as well as the English ones.
impl FromStr for ReportPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mensual" | "monthly" => Ok(ReportPeriod::Monthly),
            "trimestral" | "quarterly" => Ok(ReportPeriod::Quarterly),
            "anual" | "annual" => Ok(ReportPeriod::Annual),
            _ => Err(ValidationError::invalid_format(
                "periodo",
                "use mensual, trimestral or anual",
            )),
        }
    }
}
