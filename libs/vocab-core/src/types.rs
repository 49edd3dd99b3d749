//! Core types for the vocabulary tutor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable identifier of a term in the word bank.
pub type TermId = i64;

/// Stable identifier of a learner.
pub type LearnerId = i64;

/// A learner's progress, keyed by term.
pub type ProgressMap = HashMap<TermId, ProgressRecord>;

/// How unusual a term is. Informational only, scheduling ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Common,
    Uncommon,
    Rare,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Uncommon
    }
}

impl Difficulty {
    /// Get the difficulty name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" => Some(Self::Common),
            "uncommon" => Some(Self::Uncommon),
            "rare" => Some(Self::Rare),
            _ => None,
        }
    }
}

/// Term parsed from a word bank source (no ID assigned yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTerm {
    pub text: String,
    pub definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub difficulty: Difficulty,
}

/// Term with an assigned ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub text: String,
    pub definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub difficulty: Difficulty,
}

/// Per learner, per term review state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// 0 = unseen or just reset, 8 = maximally mastered.
    pub mastery_level: u8,
    /// `None` means the term was never scheduled.
    pub next_review_at: Option<DateTime<Utc>>,
    pub correct_streak: u32,
}

impl ProgressRecord {
    /// Whether the term was never scheduled for review.
    pub fn is_new(&self) -> bool {
        self.next_review_at.is_none()
    }
}

/// Read-only, ordered collection of terms.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    terms: Vec<Term>,
    index: HashMap<TermId, usize>,
}

impl WordBank {
    /// Build a bank from terms that already carry unique IDs.
    pub fn new(terms: Vec<Term>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(pos, term)| (term.id, pos))
            .collect();
        Self { terms, index }
    }

    /// Build a bank assigning IDs 1..=n in input order.
    pub fn from_raw(raw: Vec<RawTerm>) -> Self {
        let terms = raw
            .into_iter()
            .zip(1..)
            .map(|(raw, id)| Term {
                id,
                text: raw.text,
                definition: raw.definition,
                example: raw.example,
                difficulty: raw.difficulty,
            })
            .collect();
        Self::new(terms)
    }

    pub fn get(&self, id: TermId) -> Option<&Term> {
        self.index.get(&id).map(|&pos| &self.terms[pos])
    }

    /// Case-insensitive lookup by term text.
    pub fn find_by_text(&self, text: &str) -> Option<&Term> {
        let wanted = text.trim().to_lowercase();
        self.terms.iter().find(|t| t.text.to_lowercase() == wanted)
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter()
    }

    pub fn ids(&self) -> Vec<TermId> {
        self.terms.iter().map(|t| t.id).collect()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
