//! Storage contracts consumed by the quiz endpoints.
//!
//! Both PostgreSQL ([`crate::db::Database`]) and the in-memory store
//! ([`crate::services::memory::MemoryStore`]) implement these traits.

use async_trait::async_trait;

use vocab_core::MAX_MASTERY;

use crate::error::{ApiError, Result};
use crate::models::{Learner, LearnerId, ProgressMap, ProgressRecord, TermId, WordBank};

/// Reject records outside the storable mastery range.
pub fn validate_record(record: &ProgressRecord) -> Result<()> {
    if record.mastery_level > MAX_MASTERY {
        return Err(ApiError::BadRequest(format!(
            "mastery level {} is above the maximum of {}",
            record.mastery_level, MAX_MASTERY
        )));
    }
    Ok(())
}

/// Per learner, per term progress records.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Get one record. `None` means the term is untouched.
    async fn get(&self, learner_id: LearnerId, term_id: TermId) -> Result<Option<ProgressRecord>>;

    /// Get every record of a learner.
    async fn get_all(&self, learner_id: LearnerId) -> Result<ProgressMap>;

    /// Insert or replace one record. Fails for mastery above the maximum.
    async fn upsert(
        &self,
        learner_id: LearnerId,
        term_id: TermId,
        record: &ProgressRecord,
    ) -> Result<()>;

    /// Read, transform and write one record atomically with respect to
    /// other updates of the same (learner, term) pair.
    ///
    /// A missing record is passed to `apply` as the default record.
    async fn update(
        &self,
        learner_id: LearnerId,
        term_id: TermId,
        apply: &(dyn for<'r> Fn(&'r ProgressRecord) -> ProgressRecord + Send + Sync),
    ) -> Result<ProgressRecord>;
}

/// Learner lookup and registration.
#[async_trait]
pub trait LearnerDirectory: Send + Sync {
    async fn find_by_name(&self, username: &str) -> Result<Option<Learner>>;

    async fn find_by_id(&self, learner_id: LearnerId) -> Result<Option<Learner>>;

    /// Create a learner and seed one new record per word bank term.
    ///
    /// Fails with a conflict if the username is taken.
    async fn register(&self, username: &str, bank: &WordBank) -> Result<Learner>;
}
