//! Referenced user collaborator
//!
//! Questions are anonymous, but responders, moderators, and reviewers are
//! identified users. The lifecycle core never mutates identity fields; it only
//! bumps the stats counters and, in the expert workflow, promotes the role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user (UUID v4)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role a user holds on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Counselor,
    Therapist,
    Expert,
    Moderator,
    Admin,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Counselor => "counselor",
            Role::Therapist => "therapist",
            Role::Expert => "expert",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }

    /// Roles whose answers are flagged as expert answers
    pub fn is_expert_eligible(&self) -> bool {
        matches!(self, Role::Expert | Role::Counselor)
    }

    /// Roles allowed to moderate questions and designate best answers
    pub fn can_moderate(&self) -> bool {
        matches!(self, Role::Moderator | Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Counters updated as side effects of answer and like events
///
/// Updates are best-effort relative to the triggering document write; drift
/// is tolerated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub answers_count: u64,
    pub helpful_votes: i64,
}

/// Which stats counter an increment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatCounter {
    AnswersCount,
    HelpfulVotes,
}

impl UserStats {
    pub fn bump(&mut self, counter: StatCounter, delta: i64) {
        match counter {
            StatCounter::AnswersCount => {
                self.answers_count = self.answers_count.saturating_add_signed(delta)
            }
            StatCounter::HelpfulVotes => self.helpful_votes += delta,
        }
    }
}

/// Review state of an expert application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationStatus {
    #[default]
    NotApplied,
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn name(&self) -> &'static str {
        match self {
            ApplicationStatus::NotApplied => "not-applied",
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ApplicationStatus::Pending)
    }

    /// True once an application has been submitted, whatever its outcome
    pub fn has_applied(&self) -> bool {
        !matches!(self, ApplicationStatus::NotApplied)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An application to be verified as an expert
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpertApplication {
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

/// Professional profile attached to an expert application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertProfile {
    pub qualifications: Vec<String>,
    pub specialization: String,
    pub years_of_experience: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// A platform user, referenced by the lifecycle core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub stats: UserStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expert_profile: Option<ExpertProfile>,
    #[serde(default)]
    pub expert_application: ExpertApplication,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            role,
            is_verified: false,
            stats: UserStats::default(),
            expert_profile: None,
            expert_application: ExpertApplication::default(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expert_eligibility() {
        assert!(Role::Expert.is_expert_eligible());
        assert!(Role::Counselor.is_expert_eligible());
        assert!(!Role::Therapist.is_expert_eligible());
        assert!(!Role::User.is_expert_eligible());
        assert!(!Role::Moderator.is_expert_eligible());
    }

    #[test]
    fn test_moderation_roles() {
        assert!(Role::Moderator.can_moderate());
        assert!(Role::Admin.can_moderate());
        assert!(!Role::Expert.can_moderate());
    }

    #[test]
    fn test_stats_bump() {
        let mut stats = UserStats::default();
        stats.bump(StatCounter::AnswersCount, 1);
        stats.bump(StatCounter::HelpfulVotes, 1);
        stats.bump(StatCounter::HelpfulVotes, -1);
        assert_eq!(stats.answers_count, 1);
        assert_eq!(stats.helpful_votes, 0);
        // answers_count never goes below zero
        stats.bump(StatCounter::AnswersCount, -5);
        assert_eq!(stats.answers_count, 0);
    }

    #[test]
    fn test_application_status_serde() {
        let json = serde_json::to_string(&ApplicationStatus::NotApplied).unwrap();
        assert_eq!(json, "\"not-applied\"");
    }
}
