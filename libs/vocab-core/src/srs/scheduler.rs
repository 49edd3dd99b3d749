//! Next-term selection.
//!
//! Every term of the bank falls into one bucket relative to `now`:
//! - Due: scheduled at or before `now`
//! - New: never scheduled (no record, or no review time)
//! - Future: scheduled after `now`
//!
//! Due beats New beats Future. Within Due and Future the earliest review
//! time wins, ties going to the smallest term ID. New terms are drawn at random.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::types::{ProgressMap, ProgressRecord, TermId, WordBank};

/// Scheduling bucket of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Due,
    New,
    Future,
}

/// Classify a term by its record (or lack of one).
pub fn classify(record: Option<&ProgressRecord>, now: DateTime<Utc>) -> Bucket {
    match record.and_then(|r| r.next_review_at) {
        None => Bucket::New,
        Some(at) if at <= now => Bucket::Due,
        Some(_) => Bucket::Future,
    }
}

/// Why a term was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionReason {
    Due { mastery_level: u8 },
    New,
    EarlyReview { mastery_level: u8 },
}

impl fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Due { mastery_level } => {
                write!(f, "due for review at mastery level {}", mastery_level)
            }
            Self::New => write!(f, "new term"),
            Self::EarlyReview { mastery_level } => {
                write!(f, "early review at mastery level {}", mastery_level)
            }
        }
    }
}

/// Term chosen for the next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub term_id: TermId,
    pub reason: SelectionReason,
}

/// Earliest scheduled candidate seen so far in a bucket.
#[derive(Debug, Clone, Copy)]
struct Earliest {
    at: DateTime<Utc>,
    term_id: TermId,
    mastery_level: u8,
}

impl Earliest {
    fn offer(slot: &mut Option<Self>, candidate: Self) {
        let better = match slot {
            None => true,
            Some(current) => (candidate.at, candidate.term_id) < (current.at, current.term_id),
        };
        if better {
            *slot = Some(candidate);
        }
    }
}

/// Stateless next-term selector.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler;

impl Scheduler {
    pub fn new() -> Self {
        Self
    }

    /// Pick the single best term to quiz next.
    ///
    /// Records for IDs not in the bank are ignored.
    pub fn select_next_term<R: Rng + ?Sized>(
        &self,
        progress: &ProgressMap,
        bank: &WordBank,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Selection, QuizError> {
        let mut due: Option<Earliest> = None;
        let mut future: Option<Earliest> = None;
        let mut fresh: Vec<TermId> = Vec::new();

        for term in bank.iter() {
            let record = progress.get(&term.id);
            let mastery_level = record.map(|r| r.mastery_level).unwrap_or(0);
            match record.and_then(|r| r.next_review_at) {
                None => fresh.push(term.id),
                Some(at) => {
                    let candidate = Earliest {
                        at,
                        term_id: term.id,
                        mastery_level,
                    };
                    if at <= now {
                        Earliest::offer(&mut due, candidate);
                    } else {
                        Earliest::offer(&mut future, candidate);
                    }
                }
            }
        }

        if let Some(d) = due {
            return Ok(Selection {
                term_id: d.term_id,
                reason: SelectionReason::Due {
                    mastery_level: d.mastery_level,
                },
            });
        }

        if let Some(&term_id) = fresh.choose(rng) {
            return Ok(Selection {
                term_id,
                reason: SelectionReason::New,
            });
        }

        future
            .map(|f| Selection {
                term_id: f.term_id,
                reason: SelectionReason::EarlyReview {
                    mastery_level: f.mastery_level,
                },
            })
            .ok_or(QuizError::NoTermsAvailable)
    }
}
