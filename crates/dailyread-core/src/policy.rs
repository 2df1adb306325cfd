//! Routine policy knobs shared by the backlog and the streak calculator.

use serde::{Deserialize, Serialize};

/// Policy for backlog limits and streak display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutinePolicy {
    /// Maximum number of concurrently delayed articles (default: 2).
    pub backlog_capacity: usize,
    /// Calendar days after which a delayed article expires (default: 2).
    pub backlog_expiry_days: i64,
    /// Length of the visual streak cycle (default: 7, the weekly flame).
    pub streak_cycle_days: u32,
}

impl Default for RoutinePolicy {
    fn default() -> Self {
        Self {
            backlog_capacity: 2,
            backlog_expiry_days: 2,
            streak_cycle_days: 7,
        }
    }
}

impl RoutinePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backlog capacity.
    pub fn with_backlog_capacity(mut self, capacity: usize) -> Self {
        self.backlog_capacity = capacity;
        self
    }

    /// Set the backlog expiry in calendar days.
    pub fn with_backlog_expiry_days(mut self, days: i64) -> Self {
        self.backlog_expiry_days = days;
        self
    }

    /// Set the streak display cycle length.
    pub fn with_streak_cycle_days(mut self, days: u32) -> Self {
        self.streak_cycle_days = days;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults() {
        let policy = RoutinePolicy::default();
        assert_eq!(policy.backlog_capacity, 2);
        assert_eq!(policy.backlog_expiry_days, 2);
        assert_eq!(policy.streak_cycle_days, 7);
    }

    #[test]
    fn test_policy_builders() {
        let policy = RoutinePolicy::new()
            .with_backlog_capacity(3)
            .with_streak_cycle_days(30);
        assert_eq!(policy.backlog_capacity, 3);
        assert_eq!(policy.streak_cycle_days, 30);
    }
}
