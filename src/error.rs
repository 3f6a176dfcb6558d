//! Error types for the Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Failure envelope returned for every error response
#[derive(Serialize, utoipa::ToSchema)]
pub struct FailResponse {
    /// `"fail"` for caller errors, `"error"` for server faults
    pub status: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, envelope_status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "fail", msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "fail", msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(FailResponse {
            status: envelope_status.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
