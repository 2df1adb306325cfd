//! Tag statistics aggregator.
//!
//! A frequency counter over the tags of read articles, updated incrementally
//! as reads are recorded. Counts never decrease; the only way down is the
//! explicit ledger reset, which clears the counter entirely.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Read-count per tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagStats {
    counts: HashMap<String, u32>,
}

impl TagStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted snapshot.
    pub fn from_counts(counts: HashMap<String, u32>) -> Self {
        Self { counts }
    }

    /// Count one read for every given tag.
    pub fn record_read(&mut self, tags: &[String]) {
        for tag in tags {
            *self.counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    /// Read-count for a tag; zero if never seen.
    pub fn count(&self, tag: &str) -> u32 {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    /// All counts, order irrelevant.
    pub fn counts(&self) -> &HashMap<String, u32> {
        &self.counts
    }

    /// The `n` most-read tags, highest count first, ties broken by tag name
    /// so the output is stable.
    pub fn top(&self, n: usize) -> Vec<(String, u32)> {
        let mut pairs: Vec<(String, u32)> =
            self.counts.iter().map(|(t, c)| (t.clone(), *c)).collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        pairs.truncate(n);
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Drop every count. Used by the explicit ledger reset only.
    pub fn clear(&mut self) -> usize {
        let cleared = self.counts.len();
        self.counts.clear();
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_record_read_increments_each_tag() {
        let mut stats = TagStats::new();
        stats.record_read(&tags(&["go", "systems"]));
        stats.record_read(&tags(&["go"]));

        assert_eq!(stats.count("go"), 2);
        assert_eq!(stats.count("systems"), 1);
        assert_eq!(stats.count("unseen"), 0);
    }

    #[test]
    fn test_top_sorts_by_count_then_name() {
        let mut stats = TagStats::new();
        stats.record_read(&tags(&["go", "rust", "web"]));
        stats.record_read(&tags(&["go", "rust"]));
        stats.record_read(&tags(&["go"]));

        let top = stats.top(2);
        assert_eq!(top, vec![("go".to_string(), 3), ("rust".to_string(), 2)]);
    }

    #[test]
    fn test_clear_empties_counter() {
        let mut stats = TagStats::new();
        stats.record_read(&tags(&["go"]));
        assert_eq!(stats.clear(), 1);
        assert!(stats.is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Counts never decrease across any sequence of recorded reads.
            #[test]
            fn prop_counts_are_monotonic(batches in proptest::collection::vec(
                proptest::collection::vec("[a-z]{1,3}", 0..4),
                0..16,
            )) {
                let mut stats = TagStats::new();
                let mut highest: HashMap<String, u32> = HashMap::new();

                for batch in batches {
                    stats.record_read(&batch);
                    for (tag, count) in stats.counts() {
                        let seen = highest.entry(tag.clone()).or_insert(0);
                        prop_assert!(*count >= *seen);
                        *seen = *count;
                    }
                }
            }
        }
    }
}
