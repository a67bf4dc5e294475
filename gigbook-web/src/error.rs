//! Error responses for gigbook-web
//!
//! Maps the core error taxonomy onto HTTP status codes and a JSON body of
//! the form `{"error": {"code": ..., "message": ...}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gigbook_common::Error;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// No route for the requested path (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Error raised by the booking core
    #[error(transparent)]
    Core(#[from] Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Resource not found: {}", path),
            ),
            ApiError::Core(err @ Error::Validation(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
            }
            ApiError::Core(err @ Error::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
            ApiError::Core(err) => {
                // Store details stay in the log
                error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
