//! Question submission and public retrieval

use log::info;
use serde::Serialize;

use crate::config::Limits;
use crate::error::{QaError, QaResult};
use crate::models::{Category, Question, QuestionId, QuestionStatus};
use crate::store::{DocumentStore, QuestionFilter};

/// Input for submitting an anonymous question
#[derive(Debug, Clone)]
pub struct SubmitQuestionInput {
    pub text: String,
    /// Category tag; defaults to `general-questions` when absent
    pub category: Option<String>,
}

/// Creates a pending question with no identity attached to it.
///
/// # Errors
/// `Validation` for empty/whitespace-only text, over-length text, or an
/// unknown category.
pub async fn submit_question(
    store: &dyn DocumentStore,
    limits: &Limits,
    input: SubmitQuestionInput,
) -> QaResult<Question> {
    let text = input.text.trim();
    if text.is_empty() {
        return Err(QaError::validation("Question is required"));
    }
    if text.chars().count() > limits.max_question_chars {
        return Err(QaError::validation(format!(
            "Question cannot exceed {} characters",
            limits.max_question_chars
        )));
    }

    let category = match input.category.as_deref() {
        Some(raw) => raw.parse::<Category>().map_err(QaError::Validation)?,
        None => Category::default(),
    };

    let question = Question::new(text, category);
    store.insert_question(question.clone()).await?;
    info!(
        "question {} submitted in category {}",
        question.id, question.category
    );
    Ok(question)
}

/// Approved and answered questions, newest first.
pub async fn list_questions(store: &dyn DocumentStore) -> QaResult<Vec<Question>> {
    let filter =
        QuestionFilter::with_statuses(&[QuestionStatus::Approved, QuestionStatus::Answered]);
    Ok(store.list_questions(filter).await?)
}

/// Public listing narrowed to one category.
pub async fn list_questions_by_category(
    store: &dyn DocumentStore,
    category: &str,
) -> QaResult<Vec<Question>> {
    let category = category.parse::<Category>().map_err(QaError::Validation)?;
    let filter =
        QuestionFilter::with_statuses(&[QuestionStatus::Approved, QuestionStatus::Answered])
            .category(category);
    Ok(store.list_questions(filter).await?)
}

/// A directly fetched question with its visibility marker
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub question: Question,
    /// True when the question exists but has not cleared moderation
    pub pending_approval: bool,
}

/// Fetch by id, deliberately unfiltered: pending and rejected questions are
/// returned with `pending_approval` set rather than hidden.
///
/// # Errors
/// `NotFound` when the id does not resolve.
pub async fn get_question(store: &dyn DocumentStore, id: &QuestionId) -> QaResult<QuestionView> {
    let question = store
        .find_question(id)
        .await?
        .ok_or_else(|| QaError::not_found("Question not found"))?;
    let pending_approval = !question.status.is_publicly_visible();
    Ok(QuestionView {
        question,
        pending_approval,
    })
}
