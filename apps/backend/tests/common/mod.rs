//! Common test utilities and fixtures for integration tests.
//!
//! [`TestContext`] runs the full router over the in-memory store, so most
//! API tests need no external services. [`PgTestContext`] runs the same
//! router over PostgreSQL and requires DATABASE_URL.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::Value;

use vocab_tutor_backend::build_router;
use vocab_tutor_backend::db::Database;
use vocab_tutor_backend::models::{LearnerId, ProgressRecord, RawTerm, TermId, WordBank};
use vocab_tutor_backend::services::memory::MemoryStore;
use vocab_tutor_backend::services::store::{LearnerDirectory, ProgressStore};
use vocab_tutor_backend::AppState;

/// Test context over a fresh in-memory store.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

impl TestContext {
    /// Context with the standard six term fixture bank.
    pub fn new() -> Self {
        Self::with_terms(fixtures::sample_terms())
    }

    pub fn with_terms(terms: Vec<RawTerm>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_stores(WordBank::from_raw(terms), store.clone(), store.clone());
        Self { store, state }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Register a learner directly, bypassing the API.
    pub async fn register(&self, username: &str) -> LearnerId {
        self.store
            .register(username, &self.state.word_bank)
            .await
            .expect("Failed to register test learner")
            .id
    }

    /// Overwrite one progress record.
    pub async fn set_progress(
        &self,
        learner_id: LearnerId,
        term_id: TermId,
        mastery_level: u8,
        next_review_at: DateTime<Utc>,
    ) {
        let record = ProgressRecord {
            mastery_level,
            next_review_at: Some(next_review_at),
            correct_streak: u32::from(mastery_level),
        };
        self.store
            .upsert(learner_id, term_id, &record)
            .await
            .expect("Failed to write progress");
    }

    pub async fn progress(&self, learner_id: LearnerId, term_id: TermId) -> ProgressRecord {
        self.store
            .get(learner_id, term_id)
            .await
            .expect("Failed to read progress")
            .unwrap_or_default()
    }

    /// Definition of a term in the bank.
    pub fn definition(&self, term_id: TermId) -> String {
        self.state
            .word_bank
            .get(term_id)
            .expect("term not in bank")
            .definition
            .clone()
    }
}

/// Test context over PostgreSQL.
///
/// # Panics
/// Panics if DATABASE_URL is not set or the database is unreachable.
pub struct PgTestContext {
    pub db: Arc<Database>,
    pub state: AppState,
}

impl PgTestContext {
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url, 5)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        db.seed_terms(&fixtures::sample_terms())
            .await
            .expect("Failed to seed terms");

        let bank = db.load_word_bank().await.expect("Failed to load word bank");
        let db = Arc::new(db);
        let state = AppState::with_database(bank, db.clone());

        Self { db, state }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Remove a learner and, through the cascade, their progress.
    pub async fn cleanup_learner(&self, learner_id: LearnerId) {
        let _ = sqlx::query("DELETE FROM learners WHERE id = $1")
            .bind(learner_id)
            .execute(self.db.pool())
            .await;
    }
}

/// Parse the `user_id` field of a login response.
pub fn user_id(body: &Value) -> LearnerId {
    body["user_id"].as_i64().expect("user_id missing")
}
