//! Question document and its lifecycle state machine
//!
//! A question moves `pending -> {approved, rejected}` under moderation, and
//! `approved -> answered` automatically on its first answer. `rejected` and
//! `answered` are terminal for moderation; there is no path back to `pending`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::answer::{Answer, AnswerId};
use super::user::UserId;
use crate::error::{QaError, QaResult};

/// Unique identifier for a question (UUID v4)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of topic tags a question is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    GeneralQuestions,
    Addiction,
    MentalHealth,
    Relationships,
    SchoolIssues,
    FamilyIssues,
    PeerPressure,
    SelfEsteem,
    Bullying,
    Drugs,
    Stress,
    Depression,
    Anxiety,
    Porn,
    Masturbation,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::GeneralQuestions,
        Category::Addiction,
        Category::MentalHealth,
        Category::Relationships,
        Category::SchoolIssues,
        Category::FamilyIssues,
        Category::PeerPressure,
        Category::SelfEsteem,
        Category::Bullying,
        Category::Drugs,
        Category::Stress,
        Category::Depression,
        Category::Anxiety,
        Category::Porn,
        Category::Masturbation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::GeneralQuestions => "general-questions",
            Category::Addiction => "addiction",
            Category::MentalHealth => "mental-health",
            Category::Relationships => "relationships",
            Category::SchoolIssues => "school-issues",
            Category::FamilyIssues => "family-issues",
            Category::PeerPressure => "peer-pressure",
            Category::SelfEsteem => "self-esteem",
            Category::Bullying => "bullying",
            Category::Drugs => "drugs",
            Category::Stress => "stress",
            Category::Depression => "depression",
            Category::Anxiety => "anxiety",
            Category::Porn => "porn",
            Category::Masturbation => "masturbation",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::GeneralQuestions
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|category| category.name() == s)
            .copied()
            .ok_or_else(|| format!("Unknown category \"{s}\""))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lifecycle state of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Pending,
    Approved,
    Rejected,
    Answered,
}

impl QuestionStatus {
    pub fn name(&self) -> &'static str {
        match self {
            QuestionStatus::Pending => "pending",
            QuestionStatus::Approved => "approved",
            QuestionStatus::Rejected => "rejected",
            QuestionStatus::Answered => "answered",
        }
    }

    /// States shown in public listings
    pub fn is_publicly_visible(&self) -> bool {
        matches!(self, QuestionStatus::Approved | QuestionStatus::Answered)
    }

    /// States that accept new answers; pending and rejected are blocked
    pub fn accepts_answers(&self) -> bool {
        matches!(self, QuestionStatus::Approved | QuestionStatus::Answered)
    }

    /// Only pending questions can be moderated
    pub fn is_moderatable(&self) -> bool {
        matches!(self, QuestionStatus::Pending)
    }
}

impl std::fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decision a moderator applies to a pending question
///
/// A rejection always carries its reason; the "reason iff rejected" invariant
/// cannot be violated through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationDecision {
    Approve,
    Reject { reason: String },
}

impl ModerationDecision {
    pub fn status(&self) -> QuestionStatus {
        match self {
            ModerationDecision::Approve => QuestionStatus::Approved,
            ModerationDecision::Reject { .. } => QuestionStatus::Rejected,
        }
    }
}

/// An anonymously submitted question with its embedded answers
///
/// The asker is never recorded. Answers share the question's lifetime and are
/// addressed only through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,

    pub text: String,

    pub category: Category,

    pub status: QuestionStatus,

    pub answers: Vec<Answer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderated_by: Option<UserId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderated_at: Option<DateTime<Utc>>,

    /// Present iff `status == Rejected`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Question {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        let now = Utc::now();
        Self {
            id: QuestionId::new(),
            text: text.into(),
            category,
            status: QuestionStatus::Pending,
            answers: Vec::new(),
            moderated_by: None,
            moderated_at: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a moderation decision.
    ///
    /// # Errors
    /// `InvalidState` unless the question is still pending.
    pub fn moderate(&mut self, decision: ModerationDecision, moderator: &UserId) -> QaResult<()> {
        if !self.status.is_moderatable() {
            return Err(QaError::invalid_state("Question has already been moderated"));
        }
        match decision {
            ModerationDecision::Approve => {
                self.status = QuestionStatus::Approved;
                self.rejection_reason = None;
            }
            ModerationDecision::Reject { reason } => {
                self.status = QuestionStatus::Rejected;
                self.rejection_reason = Some(reason);
            }
        }
        self.moderated_by = Some(moderator.clone());
        self.moderated_at = Some(Utc::now());
        self.touch();
        Ok(())
    }

    /// Appends an answer, flipping `approved -> answered` on the first one.
    ///
    /// # Errors
    /// `InvalidState` for pending or rejected questions.
    pub fn push_answer(&mut self, answer: Answer) -> QaResult<()> {
        if !self.status.accepts_answers() {
            return Err(QaError::invalid_state(
                "Cannot answer pending or rejected questions",
            ));
        }
        self.answers.push(answer);
        if self.answers.len() == 1 {
            self.status = QuestionStatus::Answered;
        }
        self.touch();
        Ok(())
    }

    /// Designates the single best answer, clearing the flag everywhere else.
    ///
    /// # Errors
    /// `NotFound` if the answer does not belong to this question.
    pub fn mark_best_answer(&mut self, answer_id: &AnswerId) -> QaResult<()> {
        if !self.answers.iter().any(|answer| &answer.id == answer_id) {
            return Err(QaError::not_found("Answer not found"));
        }
        for answer in &mut self.answers {
            answer.is_best_answer = &answer.id == answer_id;
        }
        self.touch();
        Ok(())
    }

    pub fn answer(&self, answer_id: &AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|answer| &answer.id == answer_id)
    }

    pub fn answer_mut(&mut self, answer_id: &AnswerId) -> Option<&mut Answer> {
        self.answers
            .iter_mut()
            .find(|answer| &answer.id == answer_id)
    }

    pub fn contains_answer(&self, answer_id: &AnswerId) -> bool {
        self.answer(answer_id).is_some()
    }

    /// Answers in display order: best answer first, then most liked, then newest.
    pub fn sorted_answers(&self) -> Vec<Answer> {
        let mut answers = self.answers.clone();
        answers.sort_by(|a, b| {
            b.is_best_answer
                .cmp(&a.is_best_answer)
                .then_with(|| b.like_count().cmp(&a.like_count()))
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        answers
    }

    /// Copy with the answer list dropped, for the moderation queue view.
    pub fn without_answers(&self) -> Question {
        let mut question = self.clone();
        question.answers = Vec::new();
        question
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
