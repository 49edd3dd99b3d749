//! Core vocabulary tutoring library shared by the backend and its adapters.
//!
//! Provides:
//! - Spaced repetition scheduling (which term to quiz next) and grading
//! - Multiple-choice and fill-in-the-blank question construction
//! - Mastery statistics over a learner's progress
//! - Word bank parsing from JSON and CSV sources
//! - Shared types (Term, WordBank, ProgressRecord, etc.)

pub mod error;
pub mod parser;
pub mod quiz;
pub mod srs;
pub mod stats;
pub mod types;

pub use error::{ParseError, ParseResult, QuizError};
pub use parser::{parse_csv, parse_json};
pub use quiz::{build_cloze, build_question, ClozeQuestion, Question, OPTION_COUNT};
pub use srs::grader::{is_correct, GradeOutcome, Grader};
pub use srs::scheduler::{classify, Bucket, Scheduler, Selection, SelectionReason};
pub use srs::{SrsConfig, MAX_MASTERY, SRS_INTERVAL_SECS};
pub use stats::MasteryStats;
pub use types::{
    Difficulty, LearnerId, ProgressMap, ProgressRecord, RawTerm, Term, TermId, WordBank,
};
