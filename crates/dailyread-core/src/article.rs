//! Data model shared by the ledger and the backlog.
//!
//! Routine days travel as plain `YYYY-MM-DD` calendar dates
//! ([`chrono::NaiveDate`]); read/delay instants are UTC timestamps. The
//! engine never produces locale-formatted dates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An article as handed over by the content source.
///
/// The engine never fetches or mutates articles; it only receives them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// External identity, unique across the content source.
    pub id: String,

    /// Display cache; the content source may omit it.
    #[serde(default)]
    pub title: Option<String>,

    /// Display cache.
    #[serde(default)]
    pub url: Option<String>,

    /// The calendar day this article is due for reading.
    pub routine_day: NaiveDate,

    /// Topic tags, counted by the tag statistics aggregator on read.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Article {
    /// Convenience constructor for an article with no display cache.
    pub fn new(id: impl Into<String>, routine_day: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: None,
            url: None,
            routine_day,
            tags: Vec::new(),
        }
    }
}

/// One entry per article ever added to reading history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// External article identity, unique key within the ledger.
    pub article_id: String,

    #[serde(default)]
    pub article_title: Option<String>,

    #[serde(default)]
    pub article_url: Option<String>,

    /// Once true, the record is immutable in production use.
    pub is_read: bool,

    /// Set exactly once, when `is_read` transitions to true.
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,

    /// The day the article was intended for; absent on legacy records.
    #[serde(default)]
    pub routine_day: Option<NaiveDate>,

    /// Present only if this article was read after being delayed; the day it
    /// was originally due.
    #[serde(default)]
    pub original_routine_day: Option<NaiveDate>,
}

impl ProgressRecord {
    /// A fresh, unread history entry.
    pub fn unread(
        article_id: impl Into<String>,
        title: Option<String>,
        url: Option<String>,
    ) -> Self {
        Self {
            article_id: article_id.into(),
            article_title: title,
            article_url: url,
            is_read: false,
            read_at: None,
            routine_day: None,
            original_routine_day: None,
        }
    }

    /// UTC calendar date of the read, if any.
    pub fn read_date(&self) -> Option<NaiveDate> {
        self.read_at.map(|at| at.date_naive())
    }
}

/// A postponed, not-yet-read article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacklogEntry {
    /// Full article object, needed to resume reading later.
    pub article: Article,

    /// When the user postponed the article.
    pub delayed_at: DateTime<Utc>,

    /// The day the article was due when it was postponed.
    pub original_routine_day: NaiveDate,
}

impl BacklogEntry {
    /// Age of the entry in whole calendar days at `now`.
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now.date_naive() - self.delayed_at.date_naive()).num_days()
    }
}
