use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

use inkflow_core::error::CoreError;
use inkflow_core::store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `inkflow_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure talking to the backing store outside the submission
    /// pipeline (e.g. the flash design catalog read).
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The referenced booking flow does not exist (or has been reaped).
    #[error("Booking flow {0} not found")]
    FlowNotFound(Uuid),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Submission(msg) => {
                    (StatusCode::BAD_GATEWAY, "SUBMISSION_FAILED", msg.clone())
                }
            },

            // --- Store errors (catalog reads, not submission) ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The booking store is unavailable".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::FlowNotFound(id) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Booking flow {id} not found"),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
