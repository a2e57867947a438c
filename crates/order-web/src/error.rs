//! Error types for the order intake API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use intake::IntakeError;

/// Errors that can occur in API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown or expired session id.
    #[error("session not found")]
    SessionNotFound,

    /// Intake flow error.
    #[error(transparent)]
    Intake(#[from] IntakeError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::SessionNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Intake(IntakeError::AlreadySubmitted)
            | ApiError::Intake(IntakeError::SubmissionInFlight) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            ApiError::Intake(IntakeError::Store(err)) => {
                tracing::error!("Order persistence failed: {}", err);
                // The record stays in the session; the buyer may resubmit.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to submit order. Please try again.".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
