//! Test fixtures and factory functions for creating test data.

use serde_json::{json, Value};

use vocab_tutor_backend::models::{Difficulty, RawTerm};

/// Six terms with distinct definitions. Ids are assigned 1..=6 in this order.
pub fn sample_terms() -> Vec<RawTerm> {
    [
        ("Laconic", "Using very few words.", Some("His laconic reply ended the debate.")),
        ("Erudite", "Having great knowledge.", Some("The erudite professor knew every date.")),
        ("Garrulous", "Excessively talkative.", None),
        ("Ephemeral", "Lasting a very short time.", Some("Fame on the internet is ephemeral.")),
        ("Profligate", "Recklessly wasteful.", None),
        ("Iconoclast", "One who attacks cherished beliefs.", None),
    ]
    .iter()
    .map(|&(text, definition, example)| term(text, definition, example))
    .collect()
}

/// First `n` terms of [`sample_terms`].
pub fn small_bank(n: usize) -> Vec<RawTerm> {
    sample_terms().into_iter().take(n).collect()
}

pub fn term(text: &str, definition: &str, example: Option<&str>) -> RawTerm {
    RawTerm {
        text: text.to_string(),
        definition: definition.to_string(),
        example: example.map(str::to_string),
        difficulty: Difficulty::Common,
    }
}

pub fn register_request(username: &str) -> Value {
    json!({ "username": username, "mode": "register" })
}

pub fn login_request(username: &str) -> Value {
    json!({ "username": username })
}

pub fn answer_request(user_id: i64, word_id: i64, answer: &str) -> Value {
    json!({ "user_id": user_id, "word_id": word_id, "answer": answer })
}
