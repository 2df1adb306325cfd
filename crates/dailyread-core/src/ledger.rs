//! Progress ledger: per-article read records.
//!
//! The ledger is the system of record for reading history. Insertion
//! deduplicates by article id, and a record that has been marked read is
//! immutable afterwards; `mark_unread` exists for development mode only and
//! is gated by the engine, not here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::article::ProgressRecord;

/// Outcome of a `mark_read` attempt.
///
/// `AlreadyRead` and `NotFound` are silent no-ops at the engine boundary;
/// the distinction matters internally so tag counts are incremented exactly
/// once per article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkReadOutcome {
    /// The record transitioned from unread to read.
    Recorded,
    /// The record was already read; nothing changed.
    AlreadyRead,
    /// No record with that id exists; nothing changed.
    NotFound,
}

/// Insertion-ordered collection of [`ProgressRecord`]s.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressLedger {
    records: Vec<ProgressRecord>,
}

impl ProgressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from a persisted snapshot.
    pub fn from_records(records: Vec<ProgressRecord>) -> Self {
        Self { records }
    }

    /// All records in insertion order. The order is not semantically
    /// significant; it is preserved for stable persistence.
    pub fn records(&self) -> &[ProgressRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert an unread record unless the article is already present.
    ///
    /// Returns true if a record was inserted.
    pub fn add_to_history(
        &mut self,
        article_id: &str,
        title: Option<String>,
        url: Option<String>,
    ) -> bool {
        if self.get(article_id).is_some() {
            return false;
        }
        self.records
            .push(ProgressRecord::unread(article_id, title, url));
        true
    }

    /// Transition a record to read.
    ///
    /// Sets `read_at` exactly once; a record that is already read or does
    /// not exist is left untouched and reported via the outcome.
    pub fn mark_read(
        &mut self,
        article_id: &str,
        routine_day: NaiveDate,
        original_routine_day: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> MarkReadOutcome {
        let Some(record) = self.get_mut(article_id) else {
            return MarkReadOutcome::NotFound;
        };
        if record.is_read {
            return MarkReadOutcome::AlreadyRead;
        }
        record.is_read = true;
        record.read_at = Some(now);
        record.routine_day = Some(routine_day);
        record.original_routine_day = original_routine_day;
        MarkReadOutcome::Recorded
    }

    /// Clear a record's read state. Development-mode override; the engine
    /// rejects this in production before it ever reaches the ledger.
    ///
    /// Returns true if a read record was cleared.
    pub fn mark_unread(&mut self, article_id: &str) -> bool {
        match self.get_mut(article_id) {
            Some(record) if record.is_read => {
                record.is_read = false;
                record.read_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, article_id: &str) -> Option<&ProgressRecord> {
        self.records.iter().find(|r| r.article_id == article_id)
    }

    fn get_mut(&mut self, article_id: &str) -> Option<&mut ProgressRecord> {
        self.records.iter_mut().find(|r| r.article_id == article_id)
    }

    /// Whether the article was read on the caller's `today` (UTC calendar
    /// date of `read_at`).
    pub fn is_read_today(&self, article_id: &str, today: NaiveDate) -> bool {
        self.get(article_id)
            .and_then(|r| r.read_date())
            .map(|d| d == today)
            .unwrap_or(false)
    }

    /// The read subset of the ledger, input to day inference and the streak
    /// calculator.
    pub fn read_records(&self) -> Vec<&ProgressRecord> {
        self.records.iter().filter(|r| r.is_read).collect()
    }

    /// Drop every record. Used by the explicit data reset only.
    pub fn clear(&mut self) -> usize {
        let cleared = self.records.len();
        self.records.clear();
        cleared
    }
}
