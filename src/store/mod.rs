//! Document store collaborator
//!
//! The services talk to persistence through this trait only: create, find,
//! save whole documents, grouped counts, and an atomic counter increment on
//! users. Implementations own durability and indexing; the services own the
//! lifecycle semantics.
//!
//! Saves are read-modify-write with last-write-wins semantics; there is no
//! optimistic concurrency control at this seam.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::models::{
    AnswerId, ApplicationStatus, Category, Question, QuestionId, QuestionStatus, StatCounter,
    User, UserId,
};

pub mod memory;

pub use memory::MemoryStore;

/// Filter for question listings; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    pub statuses: Option<Vec<QuestionStatus>>,
    pub category: Option<Category>,
}

impl QuestionFilter {
    pub fn with_statuses(statuses: &[QuestionStatus]) -> Self {
        Self {
            statuses: Some(statuses.to_vec()),
            category: None,
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn matches(&self, question: &Question) -> bool {
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&question.status) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if question.category != category {
                return false;
            }
        }
        true
    }
}

/// Query and update primitives over question and user documents
///
/// Store failures are opaque (`anyhow::Error`); the services surface them as
/// `QaError::Store`, distinct from the typed domain errors.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_question(&self, question: Question) -> anyhow::Result<()>;

    async fn find_question(&self, id: &QuestionId) -> anyhow::Result<Option<Question>>;

    /// Resolves the question owning the given embedded answer.
    async fn find_question_with_answer(
        &self,
        answer_id: &AnswerId,
    ) -> anyhow::Result<Option<Question>>;

    /// Writes back a previously loaded question, replacing the stored document.
    async fn save_question(&self, question: &Question) -> anyhow::Result<()>;

    /// Matching questions, newest first.
    async fn list_questions(&self, filter: QuestionFilter) -> anyhow::Result<Vec<Question>>;

    async fn count_questions_by_status(
        &self,
    ) -> anyhow::Result<HashMap<QuestionStatus, u64>>;

    async fn insert_user(&self, user: User) -> anyhow::Result<()>;

    async fn find_user(&self, id: &UserId) -> anyhow::Result<Option<User>>;

    async fn save_user(&self, user: &User) -> anyhow::Result<()>;

    /// Users whose expert application is in the given state, newest application first.
    async fn list_users_by_application_status(
        &self,
        status: ApplicationStatus,
    ) -> anyhow::Result<Vec<User>>;

    /// Verified experts, most helpful first.
    async fn list_verified_experts(&self) -> anyhow::Result<Vec<User>>;

    /// Atomically adds `delta` to one of a user's counters.
    ///
    /// A missing user is a no-op, matching update-by-id semantics.
    async fn bump_user_stat(
        &self,
        id: &UserId,
        counter: StatCounter,
        delta: i64,
    ) -> anyhow::Result<()>;
}
