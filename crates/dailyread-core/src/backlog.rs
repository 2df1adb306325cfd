//! Delay queue for postponed articles.
//!
//! Bounded, most-recent-first, with calendar-day expiry. `delay` is
//! all-or-nothing: it either inserts the entry or returns a typed rejection
//! with no state change. Expiry happens only on an explicit sweep; the
//! engine has no background clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::article::{Article, BacklogEntry};
use crate::error::{CoreError, Result};
use crate::policy::RoutinePolicy;

/// Bounded queue of [`BacklogEntry`] items, most-recently-delayed first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Backlog {
    entries: Vec<BacklogEntry>,
}

impl Backlog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a backlog from a persisted snapshot.
    pub fn from_entries(entries: Vec<BacklogEntry>) -> Self {
        Self { entries }
    }

    /// Entries, most-recently-delayed first.
    pub fn entries(&self) -> &[BacklogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, article_id: &str) -> bool {
        self.entries.iter().any(|e| e.article.id == article_id)
    }

    /// Postpone an article.
    ///
    /// Rejects with [`CoreError::AlreadyDelayed`] if the article is present
    /// and [`CoreError::BacklogFull`] at capacity, leaving the queue
    /// untouched in both cases.
    pub fn delay(
        &mut self,
        article: Article,
        now: DateTime<Utc>,
        policy: &RoutinePolicy,
    ) -> Result<()> {
        if self.contains(&article.id) {
            return Err(CoreError::AlreadyDelayed {
                article_id: article.id,
            });
        }
        if self.entries.len() >= policy.backlog_capacity {
            return Err(CoreError::BacklogFull {
                capacity: policy.backlog_capacity,
            });
        }
        debug!(article_id = %article.id, "delaying article");
        let original_routine_day = article.routine_day;
        self.entries.insert(
            0,
            BacklogEntry {
                article,
                delayed_at: now,
                original_routine_day,
            },
        );
        Ok(())
    }

    /// Remove the entry for an article; no-op if absent.
    pub fn remove(&mut self, article_id: &str) {
        self.entries.retain(|e| e.article.id != article_id);
    }

    /// Remove and return the entry for an article, if present. Used when a
    /// delayed article is read and promotes to a ledger record.
    pub fn take(&mut self, article_id: &str) -> Option<BacklogEntry> {
        let idx = self.entries.iter().position(|e| e.article.id == article_id)?;
        Some(self.entries.remove(idx))
    }

    /// Remove every entry whose age reaches the policy's expiry, returning
    /// the removed article ids.
    ///
    /// The caller invokes this at session start and on resume.
    pub fn sweep_expired(&mut self, now: DateTime<Utc>, policy: &RoutinePolicy) -> Vec<String> {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.age_days(now) >= policy.backlog_expiry_days)
            .map(|e| e.article.id.clone())
            .collect();
        if !expired.is_empty() {
            self.entries
                .retain(|e| e.age_days(now) < policy.backlog_expiry_days);
            info!(count = expired.len(), "swept expired backlog entries");
        }
        expired
    }

    /// Drop every entry. Used by the explicit data reset only.
    pub fn clear(&mut self) -> usize {
        let cleared = self.entries.len();
        self.entries.clear();
        cleared
    }
}
