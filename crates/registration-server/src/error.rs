//! Error types for the registration server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use registration_store::StoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Request-level errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field was missing or blank (HTTP 400).
    #[error("{0}")]
    Validation(String),

    /// The store could not be read or written (HTTP 500). The cause is
    /// logged; only the generic public message reaches the client.
    #[error("{public}")]
    Persistence { public: &'static str, cause: String },
}

impl ApiError {
    /// Map a store error, attaching a route-appropriate public message
    /// for the persistence case.
    pub fn from_store(public: &'static str) -> impl Fn(StoreError) -> ApiError {
        move |e| match e {
            StoreError::Validation(_) => ApiError::Validation(e.to_string()),
            StoreError::Persistence(cause) => ApiError::Persistence { public, cause },
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Persistence { cause, .. } => {
                error!(%cause, "Store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
