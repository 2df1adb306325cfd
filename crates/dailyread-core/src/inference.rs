//! Routine-day inference for ambiguous reads.
//!
//! `routine_day` may be missing on legacy records, and a catch-up session
//! can put several reads on one real-world day. This module reconstructs,
//! for streak purposes, which calendar day each read was "for". It is a
//! heuristic that keeps the streak display plausible, not a guarantee of
//! historical accuracy.

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDate};

use crate::article::ProgressRecord;

/// Map each read record onto its inferred intended calendar day.
///
/// Records read on the same UTC date form a group. A lone record keeps its
/// explicit `routine_day`, falling back to the read-date. A group of N
/// records (a catch-up burst) is sorted by article id and assigned
/// read-date, read-date − 1, read-date − 2, ... — an explicit `routine_day`
/// always takes precedence over the inferred value.
pub fn infer_intended_days(records: &[&ProgressRecord]) -> HashMap<String, NaiveDate> {
    // BTreeMap keeps group iteration deterministic.
    let mut by_read_date: BTreeMap<NaiveDate, Vec<&ProgressRecord>> = BTreeMap::new();
    for record in records {
        if let Some(read_date) = record.read_date() {
            by_read_date.entry(read_date).or_default().push(record);
        }
    }

    let mut inferred = HashMap::new();
    for (read_date, mut group) in by_read_date {
        if group.len() == 1 {
            let only = group[0];
            let day = only.routine_day.unwrap_or(read_date);
            inferred.insert(only.article_id.clone(), day);
            continue;
        }

        group.sort_by(|a, b| a.article_id.cmp(&b.article_id));
        for (offset, record) in group.into_iter().enumerate() {
            let day = record
                .routine_day
                .unwrap_or_else(|| read_date - Duration::days(offset as i64));
            inferred.insert(record.article_id.clone(), day);
        }
    }
    inferred
}
