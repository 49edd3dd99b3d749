//! Answer grading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SrsConfig;
use crate::types::ProgressRecord;

/// Whether a submitted answer matches the correct one (exact string match).
pub fn is_correct(submitted: &str, correct: &str) -> bool {
    submitted == correct
}

/// Result of grading an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeOutcome {
    pub is_correct: bool,
    pub record: ProgressRecord,
}

/// Mastery and review-time updater.
#[derive(Debug, Clone, Default)]
pub struct Grader {
    config: SrsConfig,
}

impl Grader {
    pub fn new(config: SrsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SrsConfig {
        &self.config
    }

    /// Grade an answer and compute the updated record.
    pub fn record_answer(
        &self,
        record: &ProgressRecord,
        submitted: &str,
        correct: &str,
        now: DateTime<Utc>,
    ) -> GradeOutcome {
        let is_correct = is_correct(submitted, correct);

        let delta = if is_correct { 1 } else { -1 };
        let max = i32::from(self.config.max_mastery());
        let mastery_level = (i32::from(record.mastery_level) + delta).clamp(0, max) as u8;

        let correct_streak = if is_correct {
            record.correct_streak.saturating_add(1)
        } else {
            0
        };

        GradeOutcome {
            is_correct,
            record: ProgressRecord {
                mastery_level,
                next_review_at: Some(now + self.config.interval_for(mastery_level)),
                correct_streak,
            },
        }
    }
}
