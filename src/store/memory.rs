//! In-memory reference implementation of the document store
//!
//! Backed by hash maps behind async read-write locks. Used by the test suite
//! and as the semantic reference for real backends: whole-document writes,
//! last write wins, no cross-document transactions.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DocumentStore, QuestionFilter};
use crate::models::{
    AnswerId, ApplicationStatus, Question, QuestionId, QuestionStatus, Role, StatCounter, User,
    UserId,
};

#[derive(Default)]
pub struct MemoryStore {
    questions: RwLock<HashMap<QuestionId, Question>>,
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_question(&self, question: Question) -> anyhow::Result<()> {
        self.questions
            .write()
            .await
            .insert(question.id.clone(), question);
        Ok(())
    }

    async fn find_question(&self, id: &QuestionId) -> anyhow::Result<Option<Question>> {
        Ok(self.questions.read().await.get(id).cloned())
    }

    async fn find_question_with_answer(
        &self,
        answer_id: &AnswerId,
    ) -> anyhow::Result<Option<Question>> {
        Ok(self
            .questions
            .read()
            .await
            .values()
            .find(|question| question.contains_answer(answer_id))
            .cloned())
    }

    async fn save_question(&self, question: &Question) -> anyhow::Result<()> {
        self.questions
            .write()
            .await
            .insert(question.id.clone(), question.clone());
        Ok(())
    }

    async fn list_questions(&self, filter: QuestionFilter) -> anyhow::Result<Vec<Question>> {
        let mut questions: Vec<Question> = self
            .questions
            .read()
            .await
            .values()
            .filter(|question| filter.matches(question))
            .cloned()
            .collect();
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(questions)
    }

    async fn count_questions_by_status(
        &self,
    ) -> anyhow::Result<HashMap<QuestionStatus, u64>> {
        let mut counts = HashMap::new();
        for question in self.questions.read().await.values() {
            *counts.entry(question.status).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn insert_user(&self, user: User) -> anyhow::Result<()> {
        self.users.write().await.insert(user.id.clone(), user);
        Ok(())
    }

    async fn find_user(&self, id: &UserId) -> anyhow::Result<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn save_user(&self, user: &User) -> anyhow::Result<()> {
        self.users.write().await.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn list_users_by_application_status(
        &self,
        status: ApplicationStatus,
    ) -> anyhow::Result<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|user| user.expert_application.status == status)
            .cloned()
            .collect();
        users.sort_by(|a, b| b.expert_application.applied_at.cmp(&a.expert_application.applied_at));
        Ok(users)
    }

    async fn list_verified_experts(&self) -> anyhow::Result<Vec<User>> {
        let mut experts: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|user| user.role == Role::Expert && user.is_verified)
            .cloned()
            .collect();
        experts.sort_by(|a, b| b.stats.helpful_votes.cmp(&a.stats.helpful_votes));
        Ok(experts)
    }

    async fn bump_user_stat(
        &self,
        id: &UserId,
        counter: StatCounter,
        delta: i64,
    ) -> anyhow::Result<()> {
        if let Some(user) = self.users.write().await.get_mut(id) {
            user.stats.bump(counter, delta);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[tokio::test]
    async fn test_question_roundtrip() {
        let store = MemoryStore::new();
        let question = Question::new("How do I handle stress?", Category::Stress);
        let id = question.id.clone();

        store.insert_question(question).await.unwrap();
        let loaded = store.find_question(&id).await.unwrap().unwrap();
        assert_eq!(loaded.id, id);
        assert_eq!(loaded.status, QuestionStatus::Pending);

        assert!(store
            .find_question(&QuestionId::new())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_status_and_category() {
        let store = MemoryStore::new();
        let mut approved = Question::new("approved one", Category::Bullying);
        approved.status = QuestionStatus::Approved;
        store.insert_question(approved).await.unwrap();
        store
            .insert_question(Question::new("pending one", Category::Bullying))
            .await
            .unwrap();

        let filter = QuestionFilter::with_statuses(&[QuestionStatus::Approved])
            .category(Category::Bullying);
        let listed = store.list_questions(filter).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].text, "approved one");
    }

    #[tokio::test]
    async fn test_counts_group_by_status() {
        let store = MemoryStore::new();
        for _ in 0..3 {
            store
                .insert_question(Question::new("q", Category::GeneralQuestions))
                .await
                .unwrap();
        }
        let counts = store.count_questions_by_status().await.unwrap();
        assert_eq!(counts.get(&QuestionStatus::Pending), Some(&3));
        assert_eq!(counts.get(&QuestionStatus::Approved), None);
    }

    #[tokio::test]
    async fn test_bump_missing_user_is_noop() {
        let store = MemoryStore::new();
        store
            .bump_user_stat(&UserId::new(), StatCounter::HelpfulVotes, 1)
            .await
            .unwrap();
    }
}
