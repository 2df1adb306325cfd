//! # Dailyread Core Library
//!
//! Core business logic for Dailyread's daily routine progress & streak
//! engine. It follows a CLI-first philosophy: every operation is available
//! through the standalone CLI binary, with any GUI layer acting as a thin
//! shell over the same library.
//!
//! ## Architecture
//!
//! - **Progress Ledger**: append/lookup/mutate over per-article read
//!   records; records are immutable once read
//! - **Backlog**: a bounded delay queue for postponed articles with
//!   sweep-driven expiry
//! - **Inference + Streak**: pure functions evaluated on demand from a full
//!   snapshot of ledger and backlog
//! - **Storage**: a `get`/`set`/`delete` key-value seam with a SQLite
//!   implementation and TOML-based configuration
//!
//! Every time-dependent operation takes `now`/`today` from the caller; the
//! engine never reads the wall clock.
//!
//! ## Key Components
//!
//! - [`RoutineEngine`]: the engine surface consumed by UIs
//! - [`ProgressLedger`] / [`Backlog`] / [`TagStats`]: the system of record
//! - [`RoutinePolicy`]: backlog and streak-display knobs
//! - [`KvStore`]: the durable-store seam

pub mod article;
pub mod backlog;
pub mod engine;
pub mod error;
pub mod inference;
pub mod ledger;
pub mod policy;
pub mod stats;
pub mod storage;
pub mod streak;

pub use article::{Article, BacklogEntry, ProgressRecord};
pub use backlog::Backlog;
pub use engine::{EngineMode, ResetOptions, ResetSummary, RoutineEngine};
pub use error::{ConfigError, CoreError, Result, StorageError};
pub use ledger::{MarkReadOutcome, ProgressLedger};
pub use policy::RoutinePolicy;
pub use stats::TagStats;
pub use storage::{Config, KvStore, MemoryKv, SqliteKv};
