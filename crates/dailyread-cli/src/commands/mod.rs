pub mod backlog;
pub mod config;
pub mod history;
pub mod reset;
pub mod stats;
pub mod streak;

use chrono::NaiveDate;
use dailyread_core::storage::{self, SqliteKv};
use dailyread_core::{Config, EngineMode, RoutineEngine};

/// Open the engine over the on-disk store, with mode and policy taken from
/// DAILYREAD_ENV and the config file. The CLI is the process boundary, so
/// wall-clock time is sampled here and passed into the engine explicitly.
pub fn open_engine() -> Result<RoutineEngine<SqliteKv>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mode = if storage::dev_env() {
        EngineMode::Development
    } else {
        EngineMode::Production
    };
    let store = SqliteKv::open()?;
    Ok(RoutineEngine::with_policy(store, mode, config.policy())?)
}

/// The caller's "today": an explicit `YYYY-MM-DD` override, else the current
/// UTC calendar date.
pub fn resolve_today(explicit: Option<String>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match explicit {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(chrono::Utc::now().date_naive()),
    }
}

/// Split a comma-separated tag list, dropping empty items.
pub fn parse_tags(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    })
    .unwrap_or_default()
}
