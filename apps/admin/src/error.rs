//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ApiError>`; repository errors convert
//! into a status code plus a small JSON body:
//!
//! ```json
//! { "code": "insufficient_stock", "message": "insufficient stock for book 3: 2 available, 5 requested" }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use libreria_db::DbError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            code: "bad_request",
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            code: "not_found",
            message: message.into(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        let (status, code) = match &err {
            DbError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            DbError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DbError::InsufficientStock { .. } => (StatusCode::CONFLICT, "insufficient_stock"),
            DbError::UniqueViolation { .. } => (StatusCode::CONFLICT, "unique_violation"),
            DbError::ForeignKeyViolation { .. } => (StatusCode::CONFLICT, "referential_integrity"),
            DbError::ConnectionFailed(_) | DbError::PoolExhausted => {
                (StatusCode::SERVICE_UNAVAILABLE, "database_unavailable")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        ApiError {
            status,
            code,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(code = self.code, message = %self.message, "request failed");
        } else {
            warn!(code = self.code, message = %self.message, "request rejected");
        }
        let body = ErrorBody {
            code: self.code,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libreria_core::ValidationError;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::from(DbError::not_found("book", 7));
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let conflict = ApiError::from(DbError::InsufficientStock {
            book_id: 1,
            available: 2,
            requested: 5,
        });
        assert_eq!(conflict.status, StatusCode::CONFLICT);

        let invalid = ApiError::from(DbError::Validation(ValidationError::required("titulo")));
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

        let down = ApiError::from(DbError::PoolExhausted);
        assert_eq!(down.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
