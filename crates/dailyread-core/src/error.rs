//! Core error types for dailyread-core.
//!
//! A top-level [`CoreError`] covers the engine's typed rejections, with
//! storage and configuration failures folded in as sub-enums.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dailyread-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The backlog already holds its maximum number of delayed articles.
    #[error("Backlog is full: at most {capacity} delayed articles allowed")]
    BacklogFull { capacity: usize },

    /// The article is already sitting in the backlog.
    #[error("Article '{article_id}' is already delayed")]
    AlreadyDelayed { article_id: String },

    /// A development-mode-only operation was invoked in production mode.
    #[error("Operation '{operation}' is not permitted outside development mode")]
    NotPermitted { operation: &'static str },

    /// Durable-store read/write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration load/save failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file.
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A persisted collection could not be encoded or decoded.
    #[error("Snapshot serialization failed for key '{key}': {source}")]
    Snapshot {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The data directory could not be resolved or created.
    #[error("Failed to access data directory: {0}")]
    DataDir(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
