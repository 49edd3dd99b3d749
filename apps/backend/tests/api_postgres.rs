//! API tests against PostgreSQL.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL before running.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::Value;

use common::{fixtures, user_id, PgTestContext};
use vocab_tutor_backend::services::store::ProgressStore;

fn unique_name(prefix: &str) -> String {
    format!("{}-{}", prefix, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_and_answer() {
    let ctx = PgTestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let username = unique_name("pg-answer");

    let response = server
        .post("/api/login")
        .json(&fixtures::register_request(&username))
        .await;
    response.assert_status_ok();
    let learner = user_id(&response.json());

    let progress = ctx.state.progress.get_all(learner).await.unwrap();
    assert_eq!(progress.len(), ctx.state.word_bank.len());

    let question: Value = server
        .get("/api/question")
        .add_query_param("user", &username)
        .await
        .json();
    let word_id = question["word_id"].as_i64().unwrap();
    let definition = ctx.state.word_bank.get(word_id).unwrap().definition.clone();

    let answer: Value = server
        .post("/api/answer")
        .json(&fixtures::answer_request(learner, word_id, &definition))
        .await
        .json();
    assert_eq!(answer["correct"], true);
    assert_eq!(answer["mastery_level"], 1);

    let duplicate = server
        .post("/api/login")
        .json(&fixtures::register_request(&username))
        .await;
    duplicate.assert_status(StatusCode::CONFLICT);

    ctx.cleanup_learner(learner).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_concurrent_answers_are_not_lost() {
    let ctx = PgTestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let username = unique_name("pg-concurrent");

    let response = server
        .post("/api/login")
        .json(&fixtures::register_request(&username))
        .await;
    let learner = user_id(&response.json());
    let term = ctx.state.word_bank.terms()[0].clone();

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let state = ctx.state.clone();
            let definition = term.definition.clone();
            let term_id = term.id;
            tokio::spawn(async move {
                state
                    .progress
                    .update(learner, term_id, &|current| {
                        state
                            .grader
                            .record_answer(current, &definition, &definition, chrono::Utc::now())
                            .record
                    })
                    .await
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let record = ctx.state.progress.get(learner, term.id).await.unwrap().unwrap();
    assert_eq!(record.mastery_level, 5);
    assert_eq!(record.correct_streak, 5);

    ctx.cleanup_learner(learner).await;
}
