//! The routine engine: ledger + backlog + tag stats behind one surface.
//!
//! The engine owns the in-memory snapshot and an injected [`KvStore`]
//! handle. Every mutating operation applies to memory first and then
//! writes the affected collection through to the store; a failed
//! write-through is reported but never rolls memory back, since re-applying
//! the same idempotent operation simply re-flushes. Time never comes from
//! the wall clock here: callers pass `now`/`today` explicitly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::article::{Article, BacklogEntry, ProgressRecord};
use crate::backlog::Backlog;
use crate::error::{CoreError, Result, StorageError};
use crate::ledger::{MarkReadOutcome, ProgressLedger};
use crate::policy::RoutinePolicy;
use crate::stats::TagStats;
use crate::storage::KvStore;
use crate::streak;

/// Store key for the serialized progress ledger.
pub const LEDGER_KEY: &str = "progress_ledger";
/// Store key for the serialized backlog.
pub const BACKLOG_KEY: &str = "backlog";
/// Store key for the serialized tag statistics.
pub const TAG_STATS_KEY: &str = "tag_stats";

/// Whether destructive development overrides are permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    Production,
    Development,
}

/// Which collections an explicit reset clears.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ResetOptions {
    pub ledger: bool,
    pub backlog: bool,
}

/// What an explicit reset actually removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetSummary {
    pub ledger_cleared: usize,
    pub backlog_cleared: usize,
    pub tags_cleared: usize,
}

/// Progress & streak engine over an injected durable store.
pub struct RoutineEngine<S: KvStore> {
    store: S,
    mode: EngineMode,
    policy: RoutinePolicy,
    ledger: ProgressLedger,
    backlog: Backlog,
    tag_stats: TagStats,
}

impl<S: KvStore> RoutineEngine<S> {
    /// Construct with the default policy, loading the persisted snapshot.
    pub fn new(store: S, mode: EngineMode) -> Result<Self> {
        Self::with_policy(store, mode, RoutinePolicy::default())
    }

    /// Construct with an explicit policy, loading the persisted snapshot.
    pub fn with_policy(store: S, mode: EngineMode, policy: RoutinePolicy) -> Result<Self> {
        let mut engine = Self {
            store,
            mode,
            policy,
            ledger: ProgressLedger::new(),
            backlog: Backlog::new(),
            tag_stats: TagStats::new(),
        };
        engine.load()?;
        Ok(engine)
    }

    pub fn mode(&self) -> EngineMode {
        self.mode
    }

    pub fn policy(&self) -> &RoutinePolicy {
        &self.policy
    }

    fn load(&mut self) -> Result<()> {
        if let Some(raw) = self.store.get(LEDGER_KEY)? {
            let records: Vec<ProgressRecord> = decode(LEDGER_KEY, &raw)?;
            self.ledger = ProgressLedger::from_records(records);
        }
        if let Some(raw) = self.store.get(BACKLOG_KEY)? {
            let entries: Vec<BacklogEntry> = decode(BACKLOG_KEY, &raw)?;
            self.backlog = Backlog::from_entries(entries);
        }
        if let Some(raw) = self.store.get(TAG_STATS_KEY)? {
            self.tag_stats = TagStats::from_counts(decode(TAG_STATS_KEY, &raw)?);
        }
        Ok(())
    }

    /// Write every collection through to the store.
    pub fn flush(&self) -> Result<()> {
        self.flush_ledger()?;
        self.flush_backlog()?;
        self.flush_tag_stats()?;
        Ok(())
    }

    fn flush_ledger(&self) -> Result<()> {
        let raw = encode(LEDGER_KEY, self.ledger.records())?;
        self.store.set(LEDGER_KEY, &raw).map_err(CoreError::from)
    }

    fn flush_backlog(&self) -> Result<()> {
        let raw = encode(BACKLOG_KEY, self.backlog.entries())?;
        self.store.set(BACKLOG_KEY, &raw).map_err(CoreError::from)
    }

    fn flush_tag_stats(&self) -> Result<()> {
        let raw = encode(TAG_STATS_KEY, self.tag_stats.counts())?;
        self.store.set(TAG_STATS_KEY, &raw).map_err(CoreError::from)
    }

    // --- Progress ledger -------------------------------------------------

    /// Add an article to reading history; no-op if already present.
    pub fn add_to_history(
        &mut self,
        article_id: &str,
        title: Option<String>,
        url: Option<String>,
    ) -> Result<()> {
        if self.ledger.add_to_history(article_id, title, url) {
            debug!(article_id, "added article to history");
            self.flush_ledger()?;
        }
        Ok(())
    }

    /// Record a read.
    ///
    /// Silent no-op when the record is missing or already read. On success
    /// the read instant is `now`, tag counts increment once per tag, and a
    /// matching backlog entry is promoted: removed from the queue, its
    /// original due day stored on the record when the caller supplied none.
    pub fn mark_read(
        &mut self,
        article_id: &str,
        tags: &[String],
        routine_day: NaiveDate,
        original_routine_day: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        match self.ledger.get(article_id) {
            None => {
                debug!(article_id, "mark_read ignored: not in history");
                return Ok(());
            }
            Some(record) if record.is_read => {
                debug!(article_id, "mark_read ignored: already read");
                return Ok(());
            }
            Some(_) => {}
        }

        let promoted = self.backlog.take(article_id);
        let original = original_routine_day.or(promoted.as_ref().map(|e| e.original_routine_day));

        let outcome = self.ledger.mark_read(article_id, routine_day, original, now);
        debug_assert_eq!(outcome, MarkReadOutcome::Recorded);
        self.tag_stats.record_read(tags);
        debug!(article_id, promoted = promoted.is_some(), "recorded read");

        self.flush_ledger()?;
        self.flush_tag_stats()?;
        if promoted.is_some() {
            self.flush_backlog()?;
        }
        Ok(())
    }

    /// Clear a read mark. Development mode only; rejected with
    /// [`CoreError::NotPermitted`] in production.
    pub fn mark_unread(&mut self, article_id: &str) -> Result<()> {
        if self.mode != EngineMode::Development {
            return Err(CoreError::NotPermitted {
                operation: "mark_unread",
            });
        }
        if self.ledger.mark_unread(article_id) {
            debug!(article_id, "cleared read mark");
            self.flush_ledger()?;
        }
        Ok(())
    }

    pub fn get_progress(&self, article_id: &str) -> Option<&ProgressRecord> {
        self.ledger.get(article_id)
    }

    /// Reading history in insertion order.
    pub fn history(&self) -> &[ProgressRecord] {
        self.ledger.records()
    }

    /// Whether the article was read on the caller's `today`.
    pub fn is_read_today(&self, article_id: &str, today: NaiveDate) -> bool {
        self.ledger.is_read_today(article_id, today)
    }

    // --- Backlog ---------------------------------------------------------

    /// Postpone an article past its routine day.
    pub fn delay(&mut self, article: Article, now: DateTime<Utc>) -> Result<()> {
        self.backlog.delay(article, now, &self.policy)?;
        self.flush_backlog()
    }

    /// Remove a delayed article; no-op if absent.
    pub fn remove_delayed(&mut self, article_id: &str) -> Result<()> {
        if self.backlog.contains(article_id) {
            self.backlog.remove(article_id);
            self.flush_backlog()?;
        }
        Ok(())
    }

    /// Expire old backlog entries. Invoke at session start and on resume.
    pub fn sweep_expired(&mut self, now: DateTime<Utc>) -> Result<Vec<String>> {
        let removed = self.backlog.sweep_expired(now, &self.policy);
        if !removed.is_empty() {
            self.flush_backlog()?;
        }
        Ok(removed)
    }

    /// Delayed articles, most-recently-delayed first.
    pub fn backlog(&self) -> &[BacklogEntry] {
        self.backlog.entries()
    }

    // --- Derived views ---------------------------------------------------

    /// The displayed streak for `today`, recomputed from the full snapshot.
    pub fn compute_streak(&self, today: NaiveDate) -> u32 {
        streak::compute_streak(
            &self.ledger.read_records(),
            self.backlog.entries(),
            today,
            &self.policy,
        )
    }

    pub fn tag_stats(&self) -> &TagStats {
        &self.tag_stats
    }

    // --- Reset -----------------------------------------------------------

    /// Explicitly clear collections. Clearing the ledger also clears tag
    /// statistics, the one permitted non-monotonic transition.
    pub fn reset(&mut self, options: ResetOptions) -> Result<ResetSummary> {
        let mut summary = ResetSummary::default();
        if options.ledger {
            summary.ledger_cleared = self.ledger.clear();
            summary.tags_cleared = self.tag_stats.clear();
            self.store.delete(LEDGER_KEY)?;
            self.store.delete(TAG_STATS_KEY)?;
        }
        if options.backlog {
            summary.backlog_cleared = self.backlog.clear();
            self.store.delete(BACKLOG_KEY)?;
        }
        Ok(summary)
    }
}

fn encode<T: Serialize + ?Sized>(key: &'static str, value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|source| CoreError::Storage(StorageError::Snapshot { key, source }))
}

fn decode<T: for<'de> Deserialize<'de>>(key: &'static str, raw: &str) -> Result<T> {
    serde_json::from_str(raw)
        .map_err(|source| CoreError::Storage(StorageError::Snapshot { key, source }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use chrono::TimeZone;

    use crate::storage::MemoryKv;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn noon(s: &str) -> DateTime<Utc> {
        let d = date(s);
        Utc.from_utc_datetime(&d.and_hms_opt(12, 0, 0).unwrap())
    }

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn make_engine() -> RoutineEngine<MemoryKv> {
        RoutineEngine::new(MemoryKv::new(), EngineMode::Production).unwrap()
    }

    fn make_article(id: &str, day: &str) -> Article {
        Article::new(id, date(day))
    }

    /// Store that keeps working memory but can be told to fail writes.
    struct FlakyKv {
        inner: MemoryKv,
        fail_writes: Cell<bool>,
    }

    impl FlakyKv {
        fn new() -> Self {
            Self {
                inner: MemoryKv::new(),
                fail_writes: Cell::new(false),
            }
        }
    }

    impl KvStore for FlakyKv {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes.get() {
                return Err(StorageError::QueryFailed("disk unavailable".into()));
            }
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> Result<(), StorageError> {
            self.inner.delete(key)
        }
    }

    #[test]
    fn test_end_to_end_read_scenario() {
        let mut engine = make_engine();
        engine.add_to_history("a1", None, None).unwrap();
        engine
            .mark_read("a1", &tags(&["go"]), date("2024-02-01"), None, noon("2024-02-01"))
            .unwrap();

        let record = engine.get_progress("a1").unwrap();
        assert!(record.is_read);
        assert_eq!(engine.tag_stats().count("go"), 1);

        // Re-running the same read is a no-op, tag counts included.
        engine
            .mark_read("a1", &tags(&["go"]), date("2024-02-01"), None, noon("2024-02-01"))
            .unwrap();
        assert_eq!(engine.tag_stats().count("go"), 1);
    }

    #[test]
    fn test_mark_read_unknown_article_is_silent() {
        let mut engine = make_engine();
        engine
            .mark_read("ghost", &tags(&["go"]), date("2024-02-01"), None, noon("2024-02-01"))
            .unwrap();
        assert!(engine.get_progress("ghost").is_none());
        assert_eq!(engine.tag_stats().count("go"), 0);
    }

    #[test]
    fn test_mark_unread_requires_development_mode() {
        let mut engine = make_engine();
        engine.add_to_history("a1", None, None).unwrap();
        engine
            .mark_read("a1", &[], date("2024-02-01"), None, noon("2024-02-01"))
            .unwrap();

        let err = engine.mark_unread("a1").unwrap_err();
        assert!(matches!(err, CoreError::NotPermitted { operation: "mark_unread" }));
        assert!(engine.get_progress("a1").unwrap().is_read);
    }

    #[test]
    fn test_mark_unread_in_development_mode() {
        let mut engine = RoutineEngine::new(MemoryKv::new(), EngineMode::Development).unwrap();
        engine.add_to_history("a1", None, None).unwrap();
        engine
            .mark_read("a1", &[], date("2024-02-01"), None, noon("2024-02-01"))
            .unwrap();

        engine.mark_unread("a1").unwrap();
        let record = engine.get_progress("a1").unwrap();
        assert!(!record.is_read);
        assert_eq!(record.read_at, None);
    }

    #[test]
    fn test_reading_delayed_article_promotes_entry() {
        let mut engine = make_engine();
        engine.add_to_history("a3", None, None).unwrap();
        engine
            .delay(make_article("a3", "2024-01-03"), noon("2024-01-03"))
            .unwrap();

        engine
            .mark_read("a3", &[], date("2024-01-05"), None, noon("2024-01-05"))
            .unwrap();

        assert!(engine.backlog().is_empty());
        let record = engine.get_progress("a3").unwrap();
        assert_eq!(record.original_routine_day, Some(date("2024-01-03")));
    }

    #[test]
    fn test_delay_preserves_streak_and_gap_breaks_it() {
        let mut engine = make_engine();
        for (id, day) in [
            ("a1", "2024-01-01"),
            ("a2", "2024-01-02"),
            ("a4", "2024-01-04"),
            ("a5", "2024-01-05"),
        ] {
            engine.add_to_history(id, None, None).unwrap();
            engine.mark_read(id, &[], date(day), None, noon(day)).unwrap();
        }
        engine
            .delay(make_article("a3", "2024-01-03"), noon("2024-01-03"))
            .unwrap();
        assert_eq!(engine.compute_streak(date("2024-01-05")), 5);

        // Removing the bridge entry reopens the gap.
        engine.remove_delayed("a3").unwrap();
        assert_eq!(engine.compute_streak(date("2024-01-05")), 2);
    }

    #[test]
    fn test_streak_can_decrease_after_sweep() {
        let mut engine = make_engine();
        for (id, day) in [("a4", "2024-01-04"), ("a5", "2024-01-05")] {
            engine.add_to_history(id, None, None).unwrap();
            engine.mark_read(id, &[], date(day), None, noon(day)).unwrap();
        }
        engine
            .delay(make_article("a3", "2024-01-03"), noon("2024-01-03"))
            .unwrap();

        // The still-delayed day bridges backwards from today.
        assert_eq!(engine.compute_streak(date("2024-01-05")), 3);

        let removed = engine.sweep_expired(noon("2024-01-05")).unwrap();
        assert_eq!(removed, vec!["a3".to_string()]);
        assert_eq!(engine.compute_streak(date("2024-01-05")), 2);
    }

    #[test]
    fn test_backlog_full_surfaces_error() {
        let mut engine = make_engine();
        engine
            .delay(make_article("a1", "2024-01-01"), noon("2024-01-01"))
            .unwrap();
        engine
            .delay(make_article("a2", "2024-01-01"), noon("2024-01-01"))
            .unwrap();
        let err = engine
            .delay(make_article("a3", "2024-01-01"), noon("2024-01-01"))
            .unwrap_err();
        assert!(matches!(err, CoreError::BacklogFull { capacity: 2 }));
        assert_eq!(engine.backlog().len(), 2);
    }

    #[test]
    fn test_snapshot_survives_reopen() {
        let store = MemoryKv::new();
        {
            let mut engine = RoutineEngine::new(&store, EngineMode::Production).unwrap();
            engine.add_to_history("a1", Some("Title".into()), None).unwrap();
            engine
                .mark_read("a1", &tags(&["go"]), date("2024-02-01"), None, noon("2024-02-01"))
                .unwrap();
            engine
                .delay(make_article("a2", "2024-02-02"), noon("2024-02-02"))
                .unwrap();
        }

        let engine = RoutineEngine::new(&store, EngineMode::Production).unwrap();
        assert!(engine.get_progress("a1").unwrap().is_read);
        assert_eq!(engine.backlog().len(), 1);
        assert_eq!(engine.tag_stats().count("go"), 1);
    }

    #[test]
    fn test_failed_write_through_keeps_memory_consistent() {
        let store = FlakyKv::new();
        let mut engine = RoutineEngine::new(&store, EngineMode::Production).unwrap();
        engine.add_to_history("a1", None, None).unwrap();

        engine.store.fail_writes.set(true);
        let err = engine
            .mark_read("a1", &tags(&["go"]), date("2024-02-01"), None, noon("2024-02-01"))
            .unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));

        // Memory kept the mutation; the failed flush did not roll it back.
        assert!(engine.get_progress("a1").unwrap().is_read);
        assert_eq!(engine.tag_stats().count("go"), 1);

        // Once the store recovers, an explicit flush persists the state.
        engine.store.fail_writes.set(false);
        engine.flush().unwrap();
        assert!(engine.store.get(LEDGER_KEY).unwrap().unwrap().contains("a1"));
    }

    #[test]
    fn test_reset_clears_tags_with_ledger() {
        let mut engine = make_engine();
        engine.add_to_history("a1", None, None).unwrap();
        engine
            .mark_read("a1", &tags(&["go"]), date("2024-02-01"), None, noon("2024-02-01"))
            .unwrap();
        engine
            .delay(make_article("a2", "2024-02-02"), noon("2024-02-02"))
            .unwrap();

        let summary = engine
            .reset(ResetOptions { ledger: true, backlog: false })
            .unwrap();
        assert_eq!(summary.ledger_cleared, 1);
        assert_eq!(summary.tags_cleared, 1);
        assert_eq!(summary.backlog_cleared, 0);

        assert!(engine.history().is_empty());
        assert!(engine.tag_stats().is_empty());
        assert_eq!(engine.backlog().len(), 1);
    }
}
