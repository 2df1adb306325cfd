//! Streak calculation over the ledger and backlog snapshot.
//!
//! Pure and stateless: recomputed fresh from the full snapshot on every
//! call, never cached as authoritative. `today` is supplied by the caller
//! so the calculation stays deterministic and testable.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::article::{BacklogEntry, ProgressRecord};
use crate::inference::infer_intended_days;
use crate::policy::RoutinePolicy;

/// Build the set of streak-preserving calendar days.
///
/// A day is preserved when it is covered by a read (its inferred intended
/// day, plus the original due day for reads promoted out of the backlog) or
/// by a still-unread backlog entry — an unread-but-delayed day still counts,
/// preserving momentum.
pub fn preserved_days(
    read_records: &[&ProgressRecord],
    backlog: &[BacklogEntry],
) -> HashSet<NaiveDate> {
    let inferred = infer_intended_days(read_records);

    let mut days: HashSet<NaiveDate> = HashSet::new();
    for record in read_records {
        if let Some(day) = inferred.get(&record.article_id) {
            days.insert(*day);
        }
        if let Some(original) = record.original_routine_day {
            days.insert(original);
        }
    }
    for entry in backlog {
        days.insert(entry.original_routine_day);
    }
    days
}

/// Compute the displayed streak for `today`.
///
/// Zero unless `today` itself is preserved; otherwise the count of
/// consecutive preserved days ending today, wrapped into the policy's
/// display cycle. The raw unbounded count is deliberately not exposed.
pub fn compute_streak(
    read_records: &[&ProgressRecord],
    backlog: &[BacklogEntry],
    today: NaiveDate,
    policy: &RoutinePolicy,
) -> u32 {
    let days = preserved_days(read_records, backlog);
    if !days.contains(&today) {
        return 0;
    }

    let mut raw: u32 = 0;
    let mut day = today;
    while days.contains(&day) {
        raw += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    cycle_display(raw, policy.streak_cycle_days)
}

/// Wrap a raw streak into the 1..=cycle display range.
fn cycle_display(raw: u32, cycle: u32) -> u32 {
    if raw == 0 || cycle == 0 || raw <= cycle {
        raw
    } else {
        ((raw - 1) % cycle) + 1
    }
}
