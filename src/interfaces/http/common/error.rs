//! Mapping of domain errors onto HTTP responses

use axum::{http::StatusCode, Json};
use tracing::error;

use super::ApiResponse;
use crate::domain::DomainError;

/// Error half of every handler's `Result`.
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub fn domain_error(e: DomainError) -> ApiError {
    let (status, message) = match e {
        DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        DomainError::Configuration(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        e @ DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, e.to_string()),
        DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        DomainError::Storage(msg) => {
            error!(error = %msg, "Storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal storage error".to_string(),
            )
        }
    };
    (status, Json(ApiResponse::error(message)))
}
