//! Error types for the REST API.

use crate::chart::ChartError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;


/// API error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub detail: String,
    /// Error code.
    pub code: String,
}

/// API error types.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No API key header on a protected route.
    #[error("Missing API key")]
    Unauthorized,

    /// API key header does not match the configured secret.
    #[error("Invalid API key")]
    Forbidden,

    /// Request was well-formed JSON but its values are unusable.
    #[error("{0}")]
    InvalidInput(String),

    /// The chart engine failed on valid input.
    #[error("{0}")]
    Computation(String),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status and machine-readable code for this error.
    #[must_use]
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            ApiError::Computation(_) => (StatusCode::INTERNAL_SERVER_ERROR, "COMPUTATION_FAILED"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = Json(ErrorResponse {
            detail: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        if err.is_input_error() {
            ApiError::InvalidInput(err.to_string())
        } else {
            ApiError::Computation(err.to_string())
        }
    }
}
