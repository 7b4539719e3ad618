//! Sale endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use libreria_core::invoice::{render_invoice, DEFAULT_CURRENCY};
use libreria_core::{OrderLine, Sale, SaleWithItems};
use libreria_db::Database;

use crate::error::ApiError;

pub async fn list(State(db): State<Database>) -> Result<Json<Vec<Sale>>, ApiError> {
    Ok(Json(db.sales().list().await?))
}

#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

pub async fn create(
    State(db): State<Database>,
    Json(req): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<SaleWithItems>), ApiError> {
    let sale = db
        .sales()
        .create(req.customer_name.as_deref(), &req.items, req.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

pub async fn get_one(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<SaleWithItems>, ApiError> {
    match db.sales().get(id).await? {
        Some(sale) => Ok(Json(sale)),
        None => Err(ApiError::not_found(format!("sale {id} not found"))),
    }
}

#[derive(Debug, Deserialize)]
pub struct ReplaceItemsRequest {
    pub items: Vec<OrderLine>,
}

pub async fn replace_items(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(req): Json<ReplaceItemsRequest>,
) -> Result<Json<SaleWithItems>, ApiError> {
    match db.sales().update(id, &req.items).await? {
        Some(sale) => Ok(Json(sale)),
        None => Err(ApiError::not_found(format!("sale {id} not found"))),
    }
}

pub async fn remove(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if db.sales().delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("sale {id} not found")))
    }
}

/// Plain-text invoice, same rendering the CLI `factura` command uses.
pub async fn invoice(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<String, ApiError> {
    let Some(sale) = db.sales().get(id).await? else {
        return Err(ApiError::not_found(format!("sale {id} not found")));
    };
    let lines = db.sales().invoice_lines(id).await?;
    Ok(render_invoice(&sale.sale, &lines, DEFAULT_CURRENCY))
}
