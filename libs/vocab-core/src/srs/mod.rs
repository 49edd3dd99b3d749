//! Spaced repetition scheduling and grading.

pub mod grader;
pub mod scheduler;

use chrono::Duration;

/// Highest mastery level in the default table.
pub const MAX_MASTERY: u8 = 8;

/// Default mastery level -> seconds until the next eligible review.
pub const SRS_INTERVAL_SECS: [i64; MAX_MASTERY as usize + 1] = [
    0,              // 0: immediately available
    20 * 60,        // 1: 20 minutes
    45 * 60,        // 2: 45 minutes
    2 * 60 * 60,    // 3: 2 hours
    12 * 60 * 60,   // 4: 12 hours
    24 * 60 * 60,   // 5: 1 day
    5 * 86_400,     // 6: 5 days
    14 * 86_400,    // 7: 2 weeks
    30 * 86_400,    // 8: 1 month
];

/// Interval table handed to the grader at construction.
///
/// The table length defines the mastery range: level `n` is valid for
/// `0 <= n < intervals.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrsConfig {
    pub intervals: Vec<Duration>,
}

impl Default for SrsConfig {
    fn default() -> Self {
        Self {
            intervals: SRS_INTERVAL_SECS
                .iter()
                .map(|&secs| Duration::seconds(secs))
                .collect(),
        }
    }
}

impl SrsConfig {
    pub fn new(intervals: Vec<Duration>) -> Self {
        Self { intervals }
    }

    /// Highest reachable mastery level.
    pub fn max_mastery(&self) -> u8 {
        u8::try_from(self.intervals.len().saturating_sub(1)).unwrap_or(u8::MAX)
    }

    /// Time until the next review for a mastery level.
    ///
    /// Levels past the end of the table use the longest interval.
    pub fn interval_for(&self, level: u8) -> Duration {
        self.intervals
            .get(level as usize)
            .or_else(|| self.intervals.last())
            .copied()
            .unwrap_or_else(Duration::zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_schedule() {
        let config = SrsConfig::default();
        assert_eq!(config.max_mastery(), MAX_MASTERY);
        assert_eq!(config.interval_for(0), Duration::zero());
        assert_eq!(config.interval_for(1), Duration::minutes(20));
        assert_eq!(config.interval_for(2), Duration::minutes(45));
        assert_eq!(config.interval_for(3), Duration::hours(2));
        assert_eq!(config.interval_for(4), Duration::hours(12));
        assert_eq!(config.interval_for(5), Duration::days(1));
        assert_eq!(config.interval_for(6), Duration::days(5));
        assert_eq!(config.interval_for(7), Duration::days(14));
        assert_eq!(config.interval_for(8), Duration::days(30));
    }

    #[test]
    fn out_of_range_level_uses_longest_interval() {
        let config = SrsConfig::default();
        assert_eq!(config.interval_for(42), Duration::days(30));
    }

    #[test]
    fn custom_table_defines_range() {
        let config = SrsConfig::new(vec![Duration::zero(), Duration::hours(1)]);
        assert_eq!(config.max_mastery(), 1);
        assert_eq!(SrsConfig::new(vec![]).interval_for(3), Duration::zero());
    }
}
