//! Learner endpoints

use axum::{extract::State, Json};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(ApiError::BadRequest("Username must not be empty".to_string()));
    }

    let learner = match payload.mode {
        LoginMode::Login => state
            .learners
            .find_by_name(username)
            .await?
            .ok_or_else(|| ApiError::UnknownLearner(username.to_string()))?,
        LoginMode::Register => {
            let learner = state.learners.register(username, &state.word_bank).await?;
            tracing::info!(
                learner_id = learner.id,
                terms = state.word_bank.len(),
                "registered learner"
            );
            learner
        }
    };

    Ok(Json(LoginResponse {
        user_id: learner.id,
        username: learner.username,
    }))
}

/// Resolve the `?user=` query parameter to a learner.
pub(crate) async fn learner_from_query(state: &AppState, user: Option<&str>) -> Result<Learner> {
    let username = user.map(str::trim).filter(|u| !u.is_empty()).ok_or_else(|| {
        ApiError::BadRequest(
            "Username must be provided as a query parameter, e.g. ?user=your_name".to_string(),
        )
    })?;

    state
        .learners
        .find_by_name(username)
        .await?
        .ok_or_else(|| ApiError::UnknownLearner(username.to_string()))
}
