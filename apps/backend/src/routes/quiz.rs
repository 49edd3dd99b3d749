//! Quiz endpoints

use std::sync::OnceLock;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use vocab_core::{build_cloze, build_question};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::learners::learner_from_query;
use crate::AppState;

/// GET /api/question
pub async fn question(
    State(state): State<AppState>,
    Query(query): Query<LearnerQuery>,
) -> Result<Json<QuestionResponse>> {
    let learner = learner_from_query(&state, query.user.as_deref()).await?;
    let progress = state.progress.get_all(learner.id).await?;
    let now = Utc::now();

    let (selection, question) = {
        let mut rng = rand::thread_rng();
        let selection =
            state
                .scheduler
                .select_next_term(&progress, &state.word_bank, now, &mut rng)?;
        let term = state.word_bank.get(selection.term_id).ok_or_else(|| {
            ApiError::Internal(format!("selected term {} is not in the word bank", selection.term_id))
        })?;
        let question = build_question(&state.word_bank, term, &mut rng)?;
        (selection, question)
    };

    tracing::debug!(
        learner_id = learner.id,
        term_id = selection.term_id,
        reason = %selection.reason,
        "selected next term"
    );

    Ok(Json(QuestionResponse {
        user_id: learner.id,
        word_id: question.term_id,
        word: question.text,
        options: question.options,
        reason: selection.reason.to_string(),
    }))
}

/// POST /api/answer
pub async fn answer(
    State(state): State<AppState>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let learner = state
        .learners
        .find_by_id(payload.user_id)
        .await?
        .ok_or_else(|| ApiError::UnknownLearner(payload.user_id.to_string()))?;

    let term = state
        .word_bank
        .get(payload.word_id)
        .ok_or_else(|| ApiError::UnknownTerm(payload.word_id.to_string()))?;

    let now = Utc::now();
    let submitted = payload.answer.as_str();
    let correct = term.definition.as_str();
    let grader = &state.grader;
    let verdict = OnceLock::new();

    let record = state
        .progress
        .update(learner.id, term.id, &|current| {
            let outcome = grader.record_answer(current, submitted, correct, now);
            let _ = verdict.set(outcome.is_correct);
            outcome.record
        })
        .await?;
    let was_correct = verdict
        .get()
        .copied()
        .ok_or_else(|| ApiError::Internal("answer was not graded".to_string()))?;

    tracing::debug!(
        learner_id = learner.id,
        term_id = term.id,
        correct = was_correct,
        mastery_level = record.mastery_level,
        "recorded answer"
    );

    Ok(Json(AnswerResponse {
        correct: was_correct,
        correct_answer: term.definition.clone(),
        mastery_level: record.mastery_level,
        correct_streak: record.correct_streak,
        next_review_at: record.next_review_at,
    }))
}

/// GET /api/fill-in-the-blank-question
pub async fn fill_in_the_blank(State(state): State<AppState>) -> Result<Json<ClozeResponse>> {
    let cloze = build_cloze(&state.word_bank, &mut rand::thread_rng())?;

    Ok(Json(ClozeResponse {
        word_id: cloze.term_id,
        sentence: cloze.sentence,
        options: cloze.options,
        correct_answer: cloze.correct_answer,
    }))
}
