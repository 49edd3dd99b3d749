//! Progress and statistics API tests.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::Value;

use common::TestContext;

#[tokio::test]
async fn test_stats_for_new_learner() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();
    let learner = ctx.register("anish").await;

    let response = server
        .get("/api/stats")
        .add_query_param("user", "anish")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["user_id"], learner);
    assert_eq!(body["unseen"], 6);
    assert_eq!(body["due"], 0);
    for level in 0..=8 {
        assert_eq!(body[format!("level_{}", level)], 0);
    }
}

#[tokio::test]
async fn test_stats_count_levels_and_due() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();
    let learner = ctx.register("anish").await;
    let now = Utc::now();

    ctx.set_progress(learner, 1, 3, now - Duration::minutes(1)).await;
    ctx.set_progress(learner, 2, 3, now + Duration::hours(1)).await;
    ctx.set_progress(learner, 3, 8, now + Duration::days(30)).await;

    let body: Value = server
        .get("/api/stats")
        .add_query_param("user", "anish")
        .await
        .json();

    assert_eq!(body["unseen"], 3);
    assert_eq!(body["due"], 1);
    assert_eq!(body["level_3"], 2);
    assert_eq!(body["level_8"], 1);
    assert_eq!(body["level_0"], 0);
}

#[tokio::test]
async fn test_progress_for_single_term() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();
    let learner = ctx.register("anish").await;
    let at = Utc::now() + Duration::hours(2);
    ctx.set_progress(learner, 2, 3, at).await;

    let response = server
        .get("/api/progress")
        .add_query_param("user", "anish")
        .add_query_param("word_id", 2)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let progress = body["progress"].as_array().unwrap();
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0]["word_id"], 2);
    assert_eq!(progress[0]["word"], "Erudite");
    assert_eq!(progress[0]["mastery_level"], 3);
    assert_eq!(progress[0]["correct_streak"], 3);
    assert!(progress[0]["next_review_at"].is_string());
}

#[tokio::test]
async fn test_progress_for_unknown_term() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();
    ctx.register("anish").await;

    let response = server
        .get("/api/progress")
        .add_query_param("user", "anish")
        .add_query_param("word_id", 42)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
