//! TOML-based application configuration.
//!
//! Stores the routine policy knobs (backlog capacity and expiry, streak
//! display cycle). Configuration lives at `~/.config/dailyread/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::policy::RoutinePolicy;

/// Routine-policy section of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineConfig {
    #[serde(default = "default_backlog_capacity")]
    pub backlog_capacity: usize,
    #[serde(default = "default_backlog_expiry_days")]
    pub backlog_expiry_days: i64,
    #[serde(default = "default_streak_cycle_days")]
    pub streak_cycle_days: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dailyread/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub routine: RoutineConfig,
}

fn default_backlog_capacity() -> usize {
    2
}
fn default_backlog_expiry_days() -> i64 {
    2
}
fn default_streak_cycle_days() -> u32 {
    7
}

impl Default for RoutineConfig {
    fn default() -> Self {
        Self {
            backlog_capacity: default_backlog_capacity(),
            backlog_expiry_days: default_backlog_expiry_days(),
            streak_cycle_days: default_streak_cycle_days(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the default file on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(&path)?;
                Ok(cfg)
            }
        }
    }

    /// Load from an explicit path; missing file yields the default.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Ok(Self::default()),
        }
    }

    fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        self.save_to(&path)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from(path),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from(path),
            message: e.to_string(),
        })
    }

    /// The routine policy this configuration describes.
    pub fn policy(&self) -> RoutinePolicy {
        RoutinePolicy {
            backlog_capacity: self.routine.backlog_capacity,
            backlog_expiry_days: self.routine.backlog_expiry_days,
            streak_cycle_days: self.routine.streak_cycle_days,
        }
    }
}
