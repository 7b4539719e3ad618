//! User account endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use libreria_core::{NewUser, User};
use libreria_db::Database;

use crate::error::ApiError;

pub async fn list(State(db): State<Database>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(db.users().list().await?))
}

pub async fn create(
    State(db): State<Database>,
    Json(user): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let created = db.users().insert(&user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn remove(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if db.users().delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("user {id} not found")))
    }
}
