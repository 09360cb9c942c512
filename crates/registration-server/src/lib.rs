//! Event registration backend.
//!
//! Accepts participant sign-ups over HTTP, persists them through
//! `registration-store` (MongoDB or flat JSON file, selected by
//! configuration), lists them with masked phone numbers and exports
//! the full list as an XLSX workbook or a JSON file.

pub mod api;
pub mod config;
pub mod error;
pub mod export;

pub use config::{Config, StorageBackend};
pub use error::ApiError;
