//! Moderation queue, approve/reject transitions, and status statistics

use log::info;
use serde::Serialize;

use crate::auth::{Caller, Capability};
use crate::config::Limits;
use crate::error::{QaError, QaResult};
use crate::models::{ModerationDecision, Question, QuestionId, QuestionStatus};
use crate::store::{DocumentStore, QuestionFilter};

/// Page selector for the moderation queue
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRequest {
    /// 1-based page number; defaults to 1
    pub page: Option<usize>,
    /// Page size; defaults to `Limits::default_page_size`
    pub limit: Option<usize>,
}

/// One page of the pending-question queue
///
/// Answers are stripped from the listed questions; the review UI does not
/// need them.
#[derive(Debug, Clone, Serialize)]
pub struct PendingPage {
    pub questions: Vec<Question>,
    pub count: usize,
    pub total: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

/// Reverse-chronological page of pending questions.
pub async fn list_pending(
    store: &dyn DocumentStore,
    limits: &Limits,
    caller: &Caller,
    page: PageRequest,
) -> QaResult<PendingPage> {
    caller.require(Capability::ModerateQuestions)?;

    let current_page = page.page.unwrap_or(1).max(1);
    let limit = page
        .limit
        .unwrap_or(limits.default_page_size)
        .clamp(1, limits.max_page_size);

    let pending = store
        .list_questions(QuestionFilter::with_statuses(&[QuestionStatus::Pending]))
        .await?;
    let total = pending.len();
    let total_pages = total.div_ceil(limit);
    let questions: Vec<Question> = pending
        .into_iter()
        .skip((current_page - 1) * limit)
        .take(limit)
        .map(|question| question.without_answers())
        .collect();

    Ok(PendingPage {
        count: questions.len(),
        questions,
        total,
        total_pages,
        current_page,
    })
}

/// Raw moderation decision as received from the review UI
#[derive(Debug, Clone)]
pub struct ModerateInput {
    /// Must be `approved` or `rejected`
    pub status: String,
    /// Mandatory when rejecting
    pub rejection_reason: Option<String>,
}

impl ModerateInput {
    fn into_decision(self, limits: &Limits) -> QaResult<ModerationDecision> {
        match self.status.as_str() {
            "approved" => Ok(ModerationDecision::Approve),
            "rejected" => {
                let reason = self
                    .rejection_reason
                    .map(|reason| reason.trim().to_string())
                    .filter(|reason| !reason.is_empty())
                    .ok_or_else(|| {
                        QaError::validation(
                            "Rejection reason is required when rejecting a question",
                        )
                    })?;
                if reason.chars().count() > limits.max_rejection_chars {
                    return Err(QaError::validation(format!(
                        "Rejection reason cannot exceed {} characters",
                        limits.max_rejection_chars
                    )));
                }
                Ok(ModerationDecision::Reject { reason })
            }
            other => Err(QaError::validation(format!(
                "Status must be either \"approved\" or \"rejected\", got \"{other}\""
            ))),
        }
    }
}

/// Applies a moderator's approve/reject decision to a pending question.
///
/// # Errors
/// - `Authorization` when the caller cannot moderate
/// - `Validation` for an unknown status or a rejection without a reason
/// - `NotFound` when the id does not resolve
/// - `InvalidState` when the question has already been moderated
pub async fn moderate_question(
    store: &dyn DocumentStore,
    limits: &Limits,
    caller: &Caller,
    id: &QuestionId,
    input: ModerateInput,
) -> QaResult<Question> {
    caller.require(Capability::ModerateQuestions)?;
    let decision = input.into_decision(limits)?;

    let mut question = store
        .find_question(id)
        .await?
        .ok_or_else(|| QaError::not_found("Question not found"))?;
    question.moderate(decision, &caller.id)?;
    store.save_question(&question).await?;

    info!(
        "question {} {} by moderator {}",
        question.id, question.status, caller.id
    );
    Ok(question)
}

/// Count of questions in each lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModerationStats {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub answered: u64,
    pub total: u64,
}

/// Grouped status counts for the moderation dashboard.
pub async fn moderation_stats(
    store: &dyn DocumentStore,
    caller: &Caller,
) -> QaResult<ModerationStats> {
    caller.require(Capability::ModerateQuestions)?;

    let counts = store.count_questions_by_status().await?;
    let count = |status| counts.get(&status).copied().unwrap_or(0);
    let pending = count(QuestionStatus::Pending);
    let approved = count(QuestionStatus::Approved);
    let rejected = count(QuestionStatus::Rejected);
    let answered = count(QuestionStatus::Answered);

    Ok(ModerationStats {
        pending,
        approved,
        rejected,
        answered,
        total: pending + approved + rejected + answered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, UserId};
    use crate::services::question::{submit_question, SubmitQuestionInput};
    use crate::store::MemoryStore;

    fn moderator() -> Caller {
        Caller::new(UserId::new(), Role::Moderator)
    }

    fn plain_user() -> Caller {
        Caller::new(UserId::new(), Role::User)
    }

    async fn seed_pending(store: &MemoryStore, text: &str) -> Question {
        submit_question(
            store,
            &Limits::default(),
            SubmitQuestionInput {
                text: text.to_string(),
                category: None,
            },
        )
        .await
        .unwrap()
    }

    fn approve() -> ModerateInput {
        ModerateInput {
            status: "approved".to_string(),
            rejection_reason: None,
        }
    }

    #[tokio::test]
    async fn test_approve_transition() {
        let store = MemoryStore::new();
        let limits = Limits::default();
        let caller = moderator();
        let question = seed_pending(&store, "approve me").await;

        let moderated = moderate_question(&store, &limits, &caller, &question.id, approve())
            .await
            .unwrap();
        assert_eq!(moderated.status, QuestionStatus::Approved);
        assert_eq!(moderated.moderated_by, Some(caller.id.clone()));
        assert!(moderated.rejection_reason.is_none());
    }

    #[tokio::test]
    async fn test_reject_requires_reason() {
        let store = MemoryStore::new();
        let limits = Limits::default();
        let caller = moderator();
        let question = seed_pending(&store, "reject me").await;

        let err = moderate_question(
            &store,
            &limits,
            &caller,
            &question.id,
            ModerateInput {
                status: "rejected".to_string(),
                rejection_reason: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, QaError::Validation(_)));

        let moderated = moderate_question(
            &store,
            &limits,
            &caller,
            &question.id,
            ModerateInput {
                status: "rejected".to_string(),
                rejection_reason: Some("spam".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(moderated.status, QuestionStatus::Rejected);
        assert_eq!(moderated.rejection_reason.as_deref(), Some("spam"));
    }

    #[tokio::test]
    async fn test_unknown_status_fails_validation() {
        let store = MemoryStore::new();
        let question = seed_pending(&store, "status?").await;
        let err = moderate_question(
            &store,
            &Limits::default(),
            &moderator(),
            &question.id,
            ModerateInput {
                status: "archived".to_string(),
                rejection_reason: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, QaError::Validation(_)));
    }

    #[tokio::test]
    async fn test_remoderation_fails_invalid_state() {
        let store = MemoryStore::new();
        let limits = Limits::default();
        let caller = moderator();
        let question = seed_pending(&store, "decided").await;

        moderate_question(&store, &limits, &caller, &question.id, approve())
            .await
            .unwrap();
        let err = moderate_question(&store, &limits, &caller, &question.id, approve())
            .await
            .unwrap_err();
        assert!(matches!(err, QaError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_moderation_requires_capability() {
        let store = MemoryStore::new();
        let question = seed_pending(&store, "gated").await;
        let err = moderate_question(
            &store,
            &Limits::default(),
            &plain_user(),
            &question.id,
            approve(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, QaError::Authorization(_)));

        let err = list_pending(&store, &Limits::default(), &plain_user(), PageRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, QaError::Authorization(_)));
    }

    #[tokio::test]
    async fn test_missing_question_fails_not_found() {
        let store = MemoryStore::new();
        let err = moderate_question(
            &store,
            &Limits::default(),
            &moderator(),
            &QuestionId::new(),
            approve(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, QaError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_pending_page_strips_answers_and_paginates() {
        let store = MemoryStore::new();
        let limits = Limits::default();
        let caller = moderator();
        for i in 0..12 {
            seed_pending(&store, &format!("question {i}")).await;
        }

        let page = list_pending(&store, &limits, &caller, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.count, 10);
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 1);
        assert!(page.questions.iter().all(|q| q.answers.is_empty()));

        let second = list_pending(
            &store,
            &limits,
            &caller,
            PageRequest {
                page: Some(2),
                limit: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(second.count, 2);
        assert_eq!(second.current_page, 2);
    }

    #[tokio::test]
    async fn test_stats_group_and_total() {
        let store = MemoryStore::new();
        let limits = Limits::default();
        let caller = moderator();

        let approved = seed_pending(&store, "a").await;
        moderate_question(&store, &limits, &caller, &approved.id, approve())
            .await
            .unwrap();
        let rejected = seed_pending(&store, "b").await;
        moderate_question(
            &store,
            &limits,
            &caller,
            &rejected.id,
            ModerateInput {
                status: "rejected".to_string(),
                rejection_reason: Some("off topic".to_string()),
            },
        )
        .await
        .unwrap();
        seed_pending(&store, "c").await;

        let stats = moderation_stats(&store, &caller).await.unwrap();
        assert_eq!(
            stats,
            ModerationStats {
                pending: 1,
                approved: 1,
                rejected: 1,
                answered: 0,
                total: 3,
            }
        );
    }
}
