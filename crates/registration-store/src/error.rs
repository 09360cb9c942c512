//! Registration storage errors.

use thiserror::Error;

/// Errors produced by the registration store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was missing or blank. Nothing was persisted.
    #[error("Missing required field: {0}")]
    Validation(&'static str),

    /// The storage medium could not be read or written.
    #[error("Storage error: {0}")]
    Persistence(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Persistence(format!("JSON serialization error: {}", e))
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        StoreError::Persistence(e.to_string())
    }
}
