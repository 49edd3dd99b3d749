//! Example sentence endpoint

use axum::{extract::State, Json};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/generate-sentences
pub async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<ExamplesRequest>,
) -> Result<Json<ExamplesResponse>> {
    let term = state
        .word_bank
        .find_by_text(&payload.word)
        .ok_or_else(|| ApiError::UnknownTerm(payload.word.trim().to_string()))?;

    let examples = state.examples.generate_examples(term).await?;

    Ok(Json(ExamplesResponse {
        word: term.text.clone(),
        examples,
    }))
}
