//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Re-export shared types from vocab-core
pub use vocab_core::types::{
    Difficulty, LearnerId, ProgressMap, ProgressRecord, RawTerm, Term, TermId, WordBank,
};
pub use vocab_core::MasteryStats;

// === Database Entity Types ===

/// Registered learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Learner {
    pub id: LearnerId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Term stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTerm {
    pub id: i64,
    pub text: String,
    pub definition: String,
    pub example: Option<String>,
    pub difficulty: String,
}

impl DbTerm {
    /// Convert to vocab-core Term
    pub fn to_core_term(&self) -> Term {
        Term {
            id: self.id,
            text: self.text.clone(),
            definition: self.definition.clone(),
            example: self.example.clone(),
            difficulty: Difficulty::from_str(&self.difficulty).unwrap_or_default(),
        }
    }
}

/// Progress row in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProgress {
    pub learner_id: i64,
    pub term_id: i64,
    pub mastery_level: i32,
    pub next_review_at: Option<DateTime<Utc>>,
    pub correct_streak: i32,
}

impl DbProgress {
    /// Convert to vocab-core ProgressRecord
    pub fn to_core_record(&self) -> ProgressRecord {
        ProgressRecord {
            mastery_level: u8::try_from(self.mastery_level.max(0)).unwrap_or(u8::MAX),
            next_review_at: self.next_review_at,
            correct_streak: u32::try_from(self.correct_streak).unwrap_or(0),
        }
    }
}

// === API Request/Response Types ===

/// Whether a login call may create the learner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    #[serde(default)]
    pub mode: LoginMode,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: LearnerId,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnerQuery {
    pub user: Option<String>,
}

// Quiz types
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub user_id: LearnerId,
    pub word_id: TermId,
    pub word: String,
    pub options: Vec<String>,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub user_id: LearnerId,
    pub word_id: TermId,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub correct: bool,
    pub correct_answer: String,
    pub mastery_level: u8,
    pub correct_streak: u32,
    pub next_review_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClozeResponse {
    pub word_id: TermId,
    pub sentence: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

// Progress types
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressQuery {
    pub user: Option<String>,
    pub word_id: Option<TermId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub word_id: TermId,
    pub word: String,
    #[serde(flatten)]
    pub record: ProgressRecord,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub user_id: LearnerId,
    pub progress: Vec<ProgressEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub user_id: LearnerId,
    #[serde(flatten)]
    pub stats: MasteryStats,
}

// Example sentence types
#[derive(Debug, Serialize, Deserialize)]
pub struct ExamplesRequest {
    pub word: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExamplesResponse {
    pub word: String,
    pub examples: Vec<String>,
}
