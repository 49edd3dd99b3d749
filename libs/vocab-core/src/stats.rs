//! Mastery statistics for a learner's dashboard.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::srs::scheduler::{classify, Bucket};
use crate::srs::MAX_MASTERY;
use crate::types::{ProgressMap, WordBank};

/// Counts of terms per scheduling state and mastery level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryStats {
    /// Terms never scheduled.
    pub unseen: usize,
    /// Seen terms whose review time has passed.
    pub due: usize,
    /// Seen terms per mastery level, keyed `level_0` .. `level_8`.
    #[serde(flatten)]
    pub levels: BTreeMap<String, usize>,
}

impl MasteryStats {
    pub fn collect(progress: &ProgressMap, bank: &WordBank, now: DateTime<Utc>) -> Self {
        let mut levels: BTreeMap<String, usize> =
            (0..=MAX_MASTERY).map(|level| (level_key(level), 0)).collect();
        let mut unseen = 0;
        let mut due = 0;

        for term in bank.iter() {
            let record = progress.get(&term.id);
            match classify(record, now) {
                Bucket::New => unseen += 1,
                bucket => {
                    if bucket == Bucket::Due {
                        due += 1;
                    }
                    let level = record.map_or(0, |r| r.mastery_level.min(MAX_MASTERY));
                    *levels.entry(level_key(level)).or_insert(0) += 1;
                }
            }
        }

        Self { unseen, due, levels }
    }

    /// Number of seen terms at a mastery level.
    pub fn at_level(&self, level: u8) -> usize {
        self.levels.get(&level_key(level)).copied().unwrap_or(0)
    }
}

fn level_key(level: u8) -> String {
    format!("level_{}", level)
}
