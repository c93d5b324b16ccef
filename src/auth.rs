//! Centralized capability checks for protected operations
//!
//! The services never compare role strings directly; every guard goes through
//! `Caller::require` so a role rename touches exactly one place.

use crate::error::{QaError, QaResult};
use crate::models::{Role, UserId};

/// Permission level a protected operation requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Approve/reject questions, view the moderation queue, designate best answers
    ModerateQuestions,
    /// Review expert applications
    ReviewExperts,
}

/// Authenticated identity supplied by the (external) session layer
///
/// The core trusts this input; issuing and validating sessions is out of scope.
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: UserId,
    pub role: Role,
}

impl Caller {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::ModerateQuestions => self.role.can_moderate(),
            Capability::ReviewExperts => self.role.is_admin(),
        }
    }

    /// Fails with `Authorization` unless the caller holds the capability.
    pub fn require(&self, capability: Capability) -> QaResult<()> {
        if self.has(capability) {
            return Ok(());
        }
        let message = match capability {
            Capability::ModerateQuestions => "Only moderators can perform this action",
            Capability::ReviewExperts => "Only admins can review expert applications",
        };
        Err(QaError::authorization(message))
    }
}
