//! PostgreSQL database operations

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, Transaction};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::store::{validate_record, LearnerDirectory, ProgressStore};

const PROGRESS_COLUMNS: &str = "learner_id, term_id, mastery_level, next_review_at, correct_streak";

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Term Repository ===

    /// Insert terms whose text is not stored yet. Returns the number inserted.
    pub async fn seed_terms(&self, terms: &[RawTerm]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for term in terms {
            let result = sqlx::query(
                r#"
                INSERT INTO terms (text, definition, example, difficulty)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (text) DO NOTHING
                "#,
            )
            .bind(&term.text)
            .bind(&term.definition)
            .bind(&term.example)
            .bind(term.difficulty.as_str())
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Load the full word bank in ID order
    pub async fn load_word_bank(&self) -> Result<WordBank> {
        let rows = sqlx::query_as::<_, DbTerm>(
            r#"
            SELECT id, text, definition, example, difficulty
            FROM terms
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(WordBank::new(rows.iter().map(DbTerm::to_core_term).collect()))
    }

    // === Progress Repository ===

    async fn write_progress(
        tx: &mut Transaction<'_, Postgres>,
        learner_id: LearnerId,
        term_id: TermId,
        record: &ProgressRecord,
    ) -> Result<()> {
        validate_record(record)?;
        sqlx::query(
            r#"
            INSERT INTO progress (learner_id, term_id, mastery_level, next_review_at, correct_streak)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (learner_id, term_id) DO UPDATE SET
                mastery_level = EXCLUDED.mastery_level,
                next_review_at = EXCLUDED.next_review_at,
                correct_streak = EXCLUDED.correct_streak,
                updated_at = NOW()
            "#,
        )
        .bind(learner_id)
        .bind(term_id)
        .bind(i32::from(record.mastery_level))
        .bind(record.next_review_at)
        .bind(i32::try_from(record.correct_streak).unwrap_or(i32::MAX))
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ProgressStore for Database {
    async fn get(&self, learner_id: LearnerId, term_id: TermId) -> Result<Option<ProgressRecord>> {
        let row = sqlx::query_as::<_, DbProgress>(&format!(
            "SELECT {} FROM progress WHERE learner_id = $1 AND term_id = $2",
            PROGRESS_COLUMNS
        ))
        .bind(learner_id)
        .bind(term_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.to_core_record()))
    }

    async fn get_all(&self, learner_id: LearnerId) -> Result<ProgressMap> {
        let rows = sqlx::query_as::<_, DbProgress>(&format!(
            "SELECT {} FROM progress WHERE learner_id = $1",
            PROGRESS_COLUMNS
        ))
        .bind(learner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| (r.term_id, r.to_core_record()))
            .collect())
    }

    async fn upsert(
        &self,
        learner_id: LearnerId,
        term_id: TermId,
        record: &ProgressRecord,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        Self::write_progress(&mut tx, learner_id, term_id, record).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update(
        &self,
        learner_id: LearnerId,
        term_id: TermId,
        apply: &(dyn for<'r> Fn(&'r ProgressRecord) -> ProgressRecord + Send + Sync),
    ) -> Result<ProgressRecord> {
        let mut tx = self.pool.begin().await?;

        // Make sure a row exists so FOR UPDATE has something to lock.
        sqlx::query(
            r#"
            INSERT INTO progress (learner_id, term_id)
            VALUES ($1, $2)
            ON CONFLICT (learner_id, term_id) DO NOTHING
            "#,
        )
        .bind(learner_id)
        .bind(term_id)
        .execute(&mut *tx)
        .await?;

        let current = sqlx::query_as::<_, DbProgress>(&format!(
            "SELECT {} FROM progress WHERE learner_id = $1 AND term_id = $2 FOR UPDATE",
            PROGRESS_COLUMNS
        ))
        .bind(learner_id)
        .bind(term_id)
        .fetch_one(&mut *tx)
        .await?;

        let current = current.to_core_record();
        let updated = apply(&current);
        Self::write_progress(&mut tx, learner_id, term_id, &updated).await?;
        tx.commit().await?;

        Ok(updated)
    }
}

#[async_trait]
impl LearnerDirectory for Database {
    async fn find_by_name(&self, username: &str) -> Result<Option<Learner>> {
        let learner = sqlx::query_as::<_, Learner>(
            r#"
            SELECT id, username, created_at
            FROM learners
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(learner)
    }

    async fn find_by_id(&self, learner_id: LearnerId) -> Result<Option<Learner>> {
        let learner = sqlx::query_as::<_, Learner>(
            r#"
            SELECT id, username, created_at
            FROM learners
            WHERE id = $1
            "#,
        )
        .bind(learner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(learner)
    }

    async fn register(&self, username: &str, bank: &WordBank) -> Result<Learner> {
        let mut tx = self.pool.begin().await?;

        let learner = sqlx::query_as::<_, Learner>(
            r#"
            INSERT INTO learners (username)
            VALUES ($1)
            RETURNING id, username, created_at
            "#,
        )
        .bind(username)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                ApiError::Conflict(format!("username '{}' is already registered", username))
            }
            other => ApiError::StorageUnavailable(other),
        })?;

        sqlx::query(
            r#"
            INSERT INTO progress (learner_id, term_id)
            SELECT $1, UNNEST($2::BIGINT[])
            ON CONFLICT (learner_id, term_id) DO NOTHING
            "#,
        )
        .bind(learner.id)
        .bind(bank.ids())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(learner)
    }
}
