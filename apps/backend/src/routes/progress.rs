//! Progress and statistics endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::learners::learner_from_query;
use crate::AppState;

/// GET /api/progress
pub async fn get(
    State(state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<ProgressResponse>> {
    let learner = learner_from_query(&state, query.user.as_deref()).await?;

    let progress = match query.word_id {
        Some(word_id) => {
            let term = state
                .word_bank
                .get(word_id)
                .ok_or_else(|| ApiError::UnknownTerm(word_id.to_string()))?;
            let record = state
                .progress
                .get(learner.id, word_id)
                .await?
                .unwrap_or_default();
            vec![ProgressEntry {
                word_id,
                word: term.text.clone(),
                record,
            }]
        }
        None => {
            let records = state.progress.get_all(learner.id).await?;
            state
                .word_bank
                .iter()
                .map(|term| ProgressEntry {
                    word_id: term.id,
                    word: term.text.clone(),
                    record: records.get(&term.id).cloned().unwrap_or_default(),
                })
                .collect()
        }
    };

    Ok(Json(ProgressResponse {
        user_id: learner.id,
        progress,
    }))
}

/// GET /api/stats
pub async fn stats(
    State(state): State<AppState>,
    Query(query): Query<LearnerQuery>,
) -> Result<Json<StatsResponse>> {
    let learner = learner_from_query(&state, query.user.as_deref()).await?;
    let records = state.progress.get_all(learner.id).await?;

    Ok(Json(StatsResponse {
        user_id: learner.id,
        stats: MasteryStats::collect(&records, &state.word_bank, Utc::now()),
    }))
}
