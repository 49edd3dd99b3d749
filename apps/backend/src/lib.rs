pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::{Grader, Scheduler, WordBank};

use crate::config::Config;
use crate::db::Database;
use crate::services::examples::{ExampleGenerator, StoredExamples};
use crate::services::memory::MemoryStore;
use crate::services::store::{LearnerDirectory, ProgressStore};
use crate::services::word_bank;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub word_bank: Arc<WordBank>,
    pub learners: Arc<dyn LearnerDirectory>,
    pub progress: Arc<dyn ProgressStore>,
    pub examples: Arc<dyn ExampleGenerator>,
    pub scheduler: Arc<Scheduler>,
    pub grader: Arc<Grader>,
}

impl AppState {
    /// State backed by a fresh in-memory store.
    pub fn in_memory(word_bank: WordBank) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::with_stores(word_bank, store.clone(), store)
    }

    /// State backed by PostgreSQL.
    pub fn with_database(word_bank: WordBank, db: Arc<Database>) -> Self {
        Self::with_stores(word_bank, db.clone(), db)
    }

    /// State over explicit stores.
    pub fn with_stores(
        word_bank: WordBank,
        learners: Arc<dyn LearnerDirectory>,
        progress: Arc<dyn ProgressStore>,
    ) -> Self {
        Self {
            word_bank: Arc::new(word_bank),
            learners,
            progress,
            examples: Arc::new(StoredExamples),
            scheduler: Arc::new(Scheduler::new()),
            grader: Arc::new(Grader::default()),
        }
    }
}

/// Build the HTTP router with every endpoint.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/login", post(routes::learners::login))
        .route("/api/question", get(routes::quiz::question))
        .route("/api/answer", post(routes::quiz::answer))
        .route(
            "/api/fill-in-the-blank-question",
            get(routes::quiz::fill_in_the_blank),
        )
        .route("/api/progress", get(routes::progress::get))
        .route("/api/stats", get(routes::progress::stats))
        .route("/api/generate-sentences", post(routes::examples::generate))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let terms = match &config.word_bank_path {
        Some(path) => {
            tracing::info!("Loading word bank from {}", path.display());
            word_bank::read_terms(path)?
        }
        None => word_bank::builtin_terms(),
    };

    let state = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(database_url, config.max_connections).await?;

            tracing::info!("Running migrations...");
            db.run_migrations().await?;

            let inserted = db.seed_terms(&terms).await?;
            let bank = db.load_word_bank().await?;
            tracing::info!(inserted, terms = bank.len(), "word bank ready");

            AppState::with_database(bank, Arc::new(db))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, progress is kept in memory");
            let bank = WordBank::from_raw(terms);
            tracing::info!(terms = bank.len(), "word bank ready");
            AppState::in_memory(bank)
        }
    };

    let app = build_router(state);
    let addr = config.addr();

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
