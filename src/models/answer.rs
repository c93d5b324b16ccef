//! Answer sub-entity, embedded in and owned by its question
//!
//! Answers have no independent lifecycle: they are created when a responder
//! posts to an approved question and are only ever mutated through like
//! toggles and best-answer designation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Unique identifier for an answer (UUID v4), scoped to its owning question
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerId(String);

impl AnswerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AnswerId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for AnswerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for AnswerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single like on an answer; at most one entry per user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub user: UserId,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    Liked,
    Unliked,
}

/// An answer posted to a question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,

    pub content: String,

    /// Identity of the responder; tracked even though the question is anonymous
    pub answered_by: UserId,

    /// Computed once from the responder's role at posting time, never re-evaluated
    pub is_expert_answer: bool,

    pub is_best_answer: bool,

    pub likes: Vec<Like>,

    pub created_at: DateTime<Utc>,
}

impl Answer {
    pub fn new(content: impl Into<String>, answered_by: UserId, is_expert_answer: bool) -> Self {
        Self {
            id: AnswerId::new(),
            content: content.into(),
            answered_by,
            is_expert_answer,
            is_best_answer: false,
            likes: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn is_liked_by(&self, user: &UserId) -> bool {
        self.likes.iter().any(|like| &like.user == user)
    }

    /// Toggles a like: removes it if present, adds it otherwise.
    ///
    /// Never stores two like entries for the same user.
    pub fn toggle_like(&mut self, user: &UserId) -> LikeToggle {
        if self.is_liked_by(user) {
            self.likes.retain(|like| &like.user != user);
            LikeToggle::Unliked
        } else {
            self.likes.push(Like {
                user: user.clone(),
                created_at: Utc::now(),
            });
            LikeToggle::Liked
        }
    }
}
