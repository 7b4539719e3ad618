//! Health probe and billing report endpoints.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;

use libreria_core::{BillingSummary, ReportPeriod};
use libreria_db::Database;

use crate::error::ApiError;

pub async fn health(State(db): State<Database>) -> Result<Json<serde_json::Value>, ApiError> {
    if db.health_check().await {
        Ok(Json(json!({ "status": "ok" })))
    } else {
        Err(ApiError::from(libreria_db::DbError::ConnectionFailed(
            "health probe failed".to_string(),
        )))
    }
}

#[derive(Debug, Deserialize)]
pub struct BillingQuery {
    #[serde(default)]
    pub periodo: Option<String>,
}

pub async fn billing(
    State(db): State<Database>,
    Query(query): Query<BillingQuery>,
) -> Result<Json<BillingSummary>, ApiError> {
    let periodo = match query.periodo.as_deref() {
        Some(raw) => raw
            .parse::<ReportPeriod>()
            .map_err(|err| ApiError::bad_request(err.to_string()))?,
        None => ReportPeriod::Monthly,
    };

    let since = Utc::now() - Duration::days(periodo.days());
    let summary = db.sales().billing_summary(since).await?;
    Ok(Json(summary))
}
