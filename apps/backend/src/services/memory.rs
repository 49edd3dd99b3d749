//! In-memory learner and progress store.
//!
//! Used when no database is configured and by the API tests. State is lost
//! on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::{ApiError, Result};
use crate::models::{Learner, LearnerId, ProgressMap, ProgressRecord, TermId, WordBank};
use crate::services::store::{validate_record, LearnerDirectory, ProgressStore};

#[derive(Default)]
struct Inner {
    learners: HashMap<LearnerId, Learner>,
    last_id: LearnerId,
    progress: HashMap<(LearnerId, TermId), ProgressRecord>,
}

/// Mutex-guarded store; every operation holds the lock for its whole duration.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn get(&self, learner_id: LearnerId, term_id: TermId) -> Result<Option<ProgressRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner.progress.get(&(learner_id, term_id)).cloned())
    }

    async fn get_all(&self, learner_id: LearnerId) -> Result<ProgressMap> {
        let inner = self.inner.lock().await;
        Ok(inner
            .progress
            .iter()
            .filter(|((learner, _), _)| *learner == learner_id)
            .map(|(&(_, term_id), record)| (term_id, record.clone()))
            .collect())
    }

    async fn upsert(
        &self,
        learner_id: LearnerId,
        term_id: TermId,
        record: &ProgressRecord,
    ) -> Result<()> {
        validate_record(record)?;
        let mut inner = self.inner.lock().await;
        inner.progress.insert((learner_id, term_id), record.clone());
        Ok(())
    }

    async fn update(
        &self,
        learner_id: LearnerId,
        term_id: TermId,
        apply: &(dyn for<'r> Fn(&'r ProgressRecord) -> ProgressRecord + Send + Sync),
    ) -> Result<ProgressRecord> {
        let mut inner = self.inner.lock().await;
        let entry = inner.progress.entry((learner_id, term_id)).or_default();
        let updated = apply(entry);
        validate_record(&updated)?;
        *entry = updated.clone();
        Ok(updated)
    }
}

#[async_trait]
impl LearnerDirectory for MemoryStore {
    async fn find_by_name(&self, username: &str) -> Result<Option<Learner>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .learners
            .values()
            .find(|l| l.username == username)
            .cloned())
    }

    async fn find_by_id(&self, learner_id: LearnerId) -> Result<Option<Learner>> {
        let inner = self.inner.lock().await;
        Ok(inner.learners.get(&learner_id).cloned())
    }

    async fn register(&self, username: &str, bank: &WordBank) -> Result<Learner> {
        let mut inner = self.inner.lock().await;
        if inner.learners.values().any(|l| l.username == username) {
            return Err(ApiError::Conflict(format!(
                "username '{}' is already registered",
                username
            )));
        }

        inner.last_id += 1;
        let learner = Learner {
            id: inner.last_id,
            username: username.to_string(),
            created_at: Utc::now(),
        };
        inner.learners.insert(learner.id, learner.clone());

        for term in bank.iter() {
            inner
                .progress
                .entry((learner.id, term.id))
                .or_insert_with(ProgressRecord::default);
        }

        Ok(learner)
    }
}
