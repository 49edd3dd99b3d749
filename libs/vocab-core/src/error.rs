//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a word bank source.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing definition for '{word}' at line {line}")]
    MissingDefinition { word: String, line: usize },

    #[error("duplicate term '{word}' at line {line}")]
    DuplicateTerm { word: String, line: usize },

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that prevent a question from being produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("no terms available")]
    NoTermsAvailable,

    #[error("word bank has {available} terms, at least {required} are needed")]
    InsufficientWordBank { required: usize, available: usize },
}
