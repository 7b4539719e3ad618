//! Book catalog endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use libreria_core::{Book, Money, NewBook};
use libreria_db::{Database, PriceChange, PriceFilter};

use crate::error::ApiError;

pub async fn list(State(db): State<Database>) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(db.books().list().await?))
}

pub async fn create(
    State(db): State<Database>,
    Json(book): Json<NewBook>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let created = db.books().insert(&book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn remove(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if db.books().delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("book {id} not found")))
    }
}

#[derive(Debug, Deserialize)]
pub struct SetStockRequest {
    pub stock: i64,
}

pub async fn set_stock(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(req): Json<SetStockRequest>,
) -> Result<Json<Book>, ApiError> {
    match db.books().update_stock(id, req.stock).await? {
        Some(book) => Ok(Json(book)),
        None => Err(ApiError::not_found(format!("book {id} not found"))),
    }
}

/// Bulk price update: all filter fields optional, exactly one of
/// `price_cents` / `factor` required.
#[derive(Debug, Deserialize)]
pub struct UpdatePricesRequest {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub ids: Option<Vec<i64>>,
    #[serde(default)]
    pub min_price_cents: Option<i64>,
    #[serde(default)]
    pub max_price_cents: Option<i64>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub factor: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct UpdatePricesResponse {
    pub updated: u64,
}

pub async fn update_prices(
    State(db): State<Database>,
    Json(req): Json<UpdatePricesRequest>,
) -> Result<Json<UpdatePricesResponse>, ApiError> {
    let change = match (req.price_cents, req.factor) {
        (Some(cents), None) => PriceChange::Set(Money::from_cents(cents)),
        (None, Some(factor)) => PriceChange::Factor(factor),
        _ => {
            return Err(ApiError::bad_request(
                "exactly one of price_cents or factor is required",
            ))
        }
    };
    let filter = PriceFilter {
        author: req.author,
        ids: req.ids,
        min_price: req.min_price_cents.map(Money::from_cents),
        max_price: req.max_price_cents.map(Money::from_cents),
    };

    let updated = db.books().bulk_update_price(&filter, change).await?;
    Ok(Json(UpdatePricesResponse { updated }))
}
