pub mod config;
pub mod kv;

pub use config::Config;
pub use kv::{KvStore, MemoryKv, SqliteKv};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/dailyread[-dev]/` based on DAILYREAD_ENV.
///
/// Set DAILYREAD_ENV=dev to use the development data directory; the same
/// flag switches the engine into development mode at the CLI boundary.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DAILYREAD_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("dailyread-dev")
    } else {
        base_dir.join("dailyread")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}

/// Whether DAILYREAD_ENV selects development mode.
pub fn dev_env() -> bool {
    std::env::var("DAILYREAD_ENV").map(|v| v == "dev").unwrap_or(false)
}
