//! Configuration for the registration server.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Which store backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Flat JSON file on local disk
    File,
    /// MongoDB collection
    Mongo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage backend selection
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    /// Path to the registration file (file backend)
    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,

    /// MongoDB connection string (mongo backend)
    #[serde(default = "default_mongo_uri")]
    pub mongo_uri: String,

    /// MongoDB database name (mongo backend)
    #[serde(default = "default_mongo_database")]
    pub mongo_database: String,

    /// MongoDB collection name (mongo backend)
    #[serde(default = "default_mongo_collection")]
    pub mongo_collection: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            file_path: default_file_path(),
            mongo_uri: default_mongo_uri(),
            mongo_database: default_mongo_database(),
            mongo_collection: default_mongo_collection(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    3000
}

fn default_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_file_path() -> PathBuf {
    PathBuf::from("data/registrations.json")
}

fn default_mongo_uri() -> String {
    "mongodb://localhost:27017".into()
}

fn default_mongo_database() -> String {
    "pendaftaran".into()
}

fn default_mongo_collection() -> String {
    "participants".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
