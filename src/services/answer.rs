//! Answer sub-entity management
//!
//! Posting, retrieval in display order, like toggles, and best-answer
//! designation. The expert stat counters are updated best-effort after the
//! owning document write; a lost update is tolerated drift, not a failure.

use log::{info, warn};
use serde::Serialize;

use crate::auth::{Caller, Capability};
use crate::config::Limits;
use crate::error::{QaError, QaResult};
use crate::models::{Answer, AnswerId, LikeToggle, QuestionId, StatCounter};
use crate::store::DocumentStore;

/// Input for posting an answer
#[derive(Debug, Clone)]
pub struct AddAnswerInput {
    pub content: String,
}

/// Posts an answer to an approved (or already answered) question.
///
/// The expert flag is computed from the caller's role at submission time. The
/// first answer flips the question to `answered` in the same write.
///
/// # Errors
/// - `Validation` for empty or over-length content
/// - `NotFound` when the question id does not resolve
/// - `InvalidState` for pending or rejected questions
pub async fn add_answer(
    store: &dyn DocumentStore,
    limits: &Limits,
    caller: &Caller,
    question_id: &QuestionId,
    input: AddAnswerInput,
) -> QaResult<Answer> {
    let content = input.content.trim();
    if content.is_empty() {
        return Err(QaError::validation("Answer content is required"));
    }
    if content.chars().count() > limits.max_answer_chars {
        return Err(QaError::validation(format!(
            "Answer cannot exceed {} characters",
            limits.max_answer_chars
        )));
    }

    let mut question = store
        .find_question(question_id)
        .await?
        .ok_or_else(|| QaError::not_found("Question not found"))?;

    let answer = Answer::new(content, caller.id.clone(), caller.role.is_expert_eligible());
    question.push_answer(answer.clone())?;
    store.save_question(&question).await?;

    if answer.is_expert_answer {
        // The answer is already saved; a lost counter update is tolerated drift.
        if let Err(err) = store
            .bump_user_stat(&caller.id, StatCounter::AnswersCount, 1)
            .await
        {
            warn!("failed to bump answers_count for {}: {err:#}", caller.id);
        }
    }

    info!(
        "answer {} added to question {} (status now {})",
        answer.id, question.id, question.status
    );
    Ok(answer)
}

/// Sorted answers of a publicly visible question
#[derive(Debug, Clone, Serialize)]
pub struct AnswersView {
    /// The question text, for display alongside its answers
    pub question: String,
    pub count: usize,
    pub answers: Vec<Answer>,
}

/// Answers in display order: best answer first, then most liked, then newest.
///
/// # Errors
/// `NotFound` when the question is absent or not yet approved.
pub async fn get_answers(
    store: &dyn DocumentStore,
    question_id: &QuestionId,
) -> QaResult<AnswersView> {
    let question = store
        .find_question(question_id)
        .await?
        .ok_or_else(|| QaError::not_found("Question not found"))?;
    if !question.status.is_publicly_visible() {
        return Err(QaError::not_found("Question not found or not yet approved"));
    }

    let answers = question.sorted_answers();
    Ok(AnswersView {
        question: question.text.clone(),
        count: answers.len(),
        answers,
    })
}

/// Outcome of a like toggle with the resulting count
#[derive(Debug, Clone)]
pub struct LikeView {
    pub outcome: LikeToggle,
    pub likes: usize,
}

/// Toggles the caller's like on an answer.
///
/// When the author currently holds an expert-eligible role, their
/// `helpful_votes` counter moves with the toggle, best-effort.
///
/// # Errors
/// `NotFound` when no question owns the answer id.
pub async fn toggle_like(
    store: &dyn DocumentStore,
    caller: &Caller,
    answer_id: &AnswerId,
) -> QaResult<LikeView> {
    let mut question = store
        .find_question_with_answer(answer_id)
        .await?
        .ok_or_else(|| QaError::not_found("Answer not found"))?;
    let answer = question
        .answer_mut(answer_id)
        .ok_or_else(|| QaError::not_found("Answer not found"))?;

    let outcome = answer.toggle_like(&caller.id);
    let likes = answer.like_count();
    let author = answer.answered_by.clone();
    store.save_question(&question).await?;

    // The author's live role decides the bump, not the frozen expert flag.
    let delta = match outcome {
        LikeToggle::Liked => 1,
        LikeToggle::Unliked => -1,
    };
    match store.find_user(&author).await {
        Ok(Some(user)) if user.role.is_expert_eligible() => {
            if let Err(err) = store
                .bump_user_stat(&author, StatCounter::HelpfulVotes, delta)
                .await
            {
                warn!("failed to bump helpful_votes for {author}: {err:#}");
            }
        }
        Ok(_) => {}
        Err(err) => warn!("failed to load author {author} of answer {answer_id}: {err:#}"),
    }

    Ok(LikeView { outcome, likes })
}

/// Designates the single best answer of a question.
///
/// # Errors
/// - `Authorization` when the caller cannot moderate
/// - `NotFound` for an absent question or an answer of another question
pub async fn mark_best_answer(
    store: &dyn DocumentStore,
    caller: &Caller,
    question_id: &QuestionId,
    answer_id: &AnswerId,
) -> QaResult<Answer> {
    caller.require(Capability::ModerateQuestions)?;

    let mut question = store
        .find_question(question_id)
        .await?
        .ok_or_else(|| QaError::not_found("Question not found"))?;
    question.mark_best_answer(answer_id)?;
    store.save_question(&question).await?;

    info!(
        "answer {} marked best on question {} by {}",
        answer_id, question.id, caller.id
    );
    question
        .answer(answer_id)
        .cloned()
        .ok_or_else(|| QaError::not_found("Answer not found"))
}
