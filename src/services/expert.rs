//! Expert verification workflow
//!
//! Users apply with a professional profile; an admin reviews the application.
//! Approval promotes the user to the expert role and marks them verified,
//! which is what makes their future answers expert answers.

use chrono::Utc;
use log::info;

use crate::auth::{Caller, Capability};
use crate::error::{QaError, QaResult};
use crate::models::{ApplicationStatus, ExpertApplication, ExpertProfile, Role, User, UserId};
use crate::store::DocumentStore;

/// Input for an expert application
#[derive(Debug, Clone, Default)]
pub struct ExpertApplicationInput {
    pub qualifications: Vec<String>,
    pub specialization: String,
    pub years_of_experience: Option<u32>,
    pub license_number: Option<String>,
    pub organization: Option<String>,
    pub bio: Option<String>,
}

fn trimmed_opt(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Submits the caller's expert application.
///
/// # Errors
/// - `NotFound` when the caller's user record is missing
/// - `InvalidState` when an application was already submitted
/// - `Validation` when qualifications or specialization are missing
pub async fn apply_for_expert(
    store: &dyn DocumentStore,
    caller: &Caller,
    input: ExpertApplicationInput,
) -> QaResult<User> {
    let mut user = store
        .find_user(&caller.id)
        .await?
        .ok_or_else(|| QaError::not_found("User not found"))?;
    if user.expert_application.status.has_applied() {
        return Err(QaError::invalid_state(
            "You have already submitted an expert application",
        ));
    }

    let specialization = input.specialization.trim().to_string();
    let qualifications: Vec<String> = input
        .qualifications
        .iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();
    if qualifications.is_empty() || specialization.is_empty() {
        return Err(QaError::validation(
            "Qualifications and specialization are required",
        ));
    }

    user.expert_profile = Some(ExpertProfile {
        qualifications,
        specialization,
        years_of_experience: input.years_of_experience.unwrap_or(0),
        license_number: trimmed_opt(input.license_number),
        organization: trimmed_opt(input.organization),
        bio: trimmed_opt(input.bio),
    });
    user.expert_application = ExpertApplication {
        status: ApplicationStatus::Pending,
        applied_at: Some(Utc::now()),
        ..ExpertApplication::default()
    };
    store.save_user(&user).await?;

    info!("expert application submitted by {}", user.id);
    Ok(user)
}

/// Applications in the given review state, newest first; defaults to pending.
pub async fn list_applications(
    store: &dyn DocumentStore,
    caller: &Caller,
    status: Option<ApplicationStatus>,
) -> QaResult<Vec<User>> {
    caller.require(Capability::ReviewExperts)?;
    Ok(store
        .list_users_by_application_status(status.unwrap_or(ApplicationStatus::Pending))
        .await?)
}

/// Raw review decision for an expert application
#[derive(Debug, Clone)]
pub struct ReviewApplicationInput {
    /// Must be `approved` or `rejected`
    pub status: String,
    /// Mandatory when rejecting
    pub rejection_reason: Option<String>,
}

/// Reviews a pending expert application.
///
/// Approval promotes the applicant to `expert` and sets the verified flag;
/// rejection records the mandatory reason. Either way the reviewer and
/// timestamp are recorded.
///
/// # Errors
/// - `Authorization` when the caller is not an admin
/// - `Validation` for an unknown status or a rejection without a reason
/// - `NotFound` for an unknown user
/// - `InvalidState` when the application is not pending
pub async fn review_application(
    store: &dyn DocumentStore,
    caller: &Caller,
    user_id: &UserId,
    input: ReviewApplicationInput,
) -> QaResult<User> {
    caller.require(Capability::ReviewExperts)?;
    let approve = match input.status.as_str() {
        "approved" => true,
        "rejected" => false,
        other => {
            return Err(QaError::validation(format!(
                "Status must be either \"approved\" or \"rejected\", got \"{other}\""
            )))
        }
    };

    let mut user = store
        .find_user(user_id)
        .await?
        .ok_or_else(|| QaError::not_found("User not found"))?;
    if !user.expert_application.status.is_pending() {
        return Err(QaError::invalid_state(
            "Application has already been reviewed",
        ));
    }

    if approve {
        user.expert_application.status = ApplicationStatus::Approved;
        user.expert_application.rejection_reason = None;
        user.role = Role::Expert;
        user.is_verified = true;
    } else {
        let reason = input
            .rejection_reason
            .map(|reason| reason.trim().to_string())
            .filter(|reason| !reason.is_empty())
            .ok_or_else(|| {
                QaError::validation("Rejection reason is required when rejecting an application")
            })?;
        user.expert_application.status = ApplicationStatus::Rejected;
        user.expert_application.rejection_reason = Some(reason);
    }
    user.expert_application.reviewed_at = Some(Utc::now());
    user.expert_application.reviewed_by = Some(caller.id.clone());
    store.save_user(&user).await?;

    info!(
        "expert application for {} {}",
        user.id, user.expert_application.status
    );
    Ok(user)
}

/// Verified experts, optionally filtered by specialization substring
/// (case-insensitive), most helpful first.
pub async fn list_experts(
    store: &dyn DocumentStore,
    specialization: Option<&str>,
) -> QaResult<Vec<User>> {
    let mut experts = store.list_verified_experts().await?;
    if let Some(needle) = specialization {
        let needle = needle.to_lowercase();
        experts.retain(|user| {
            user.expert_profile
                .as_ref()
                .is_some_and(|profile| profile.specialization.to_lowercase().contains(&needle))
        });
    }
    Ok(experts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn caller_for(user: &User) -> Caller {
        Caller::new(user.id.clone(), user.role)
    }

    fn admin_caller() -> Caller {
        Caller::new(UserId::new(), Role::Admin)
    }

    fn application() -> ExpertApplicationInput {
        ExpertApplicationInput {
            qualifications: vec!["MSc Psychology".to_string()],
            specialization: "Adolescent anxiety".to_string(),
            years_of_experience: Some(6),
            ..ExpertApplicationInput::default()
        }
    }

    async fn seed_applicant(store: &MemoryStore) -> User {
        let user = User::new("hopeful", Role::User);
        store.insert_user(user.clone()).await.unwrap();
        apply_for_expert(store, &caller_for(&user), application())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_apply_sets_pending_application() {
        let store = MemoryStore::new();
        let user = seed_applicant(&store).await;
        assert!(user.expert_application.status.is_pending());
        assert!(user.expert_application.applied_at.is_some());
        assert_eq!(
            user.expert_profile.as_ref().unwrap().specialization,
            "Adolescent anxiety"
        );
    }

    #[tokio::test]
    async fn test_double_apply_fails_invalid_state() {
        let store = MemoryStore::new();
        let user = seed_applicant(&store).await;
        let err = apply_for_expert(&store, &caller_for(&user), application())
            .await
            .unwrap_err();
        assert!(matches!(err, QaError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_apply_requires_profile_fields() {
        let store = MemoryStore::new();
        let user = User::new("empty-handed", Role::User);
        store.insert_user(user.clone()).await.unwrap();
        let err = apply_for_expert(
            &store,
            &caller_for(&user),
            ExpertApplicationInput::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, QaError::Validation(_)));
    }

    #[tokio::test]
    async fn test_approval_promotes_to_verified_expert() {
        let store = MemoryStore::new();
        let applicant = seed_applicant(&store).await;

        let reviewed = review_application(
            &store,
            &admin_caller(),
            &applicant.id,
            ReviewApplicationInput {
                status: "approved".to_string(),
                rejection_reason: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(reviewed.role, Role::Expert);
        assert!(reviewed.is_verified);
        assert_eq!(
            reviewed.expert_application.status,
            ApplicationStatus::Approved
        );
        assert!(reviewed.expert_application.reviewed_by.is_some());

        let experts = list_experts(&store, None).await.unwrap();
        assert_eq!(experts.len(), 1);
        let filtered = list_experts(&store, Some("ANXIETY")).await.unwrap();
        assert_eq!(filtered.len(), 1);
        let none = list_experts(&store, Some("nutrition")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_rejection_requires_reason_and_is_final() {
        let store = MemoryStore::new();
        let applicant = seed_applicant(&store).await;
        let admin = admin_caller();

        let err = review_application(
            &store,
            &admin,
            &applicant.id,
            ReviewApplicationInput {
                status: "rejected".to_string(),
                rejection_reason: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, QaError::Validation(_)));

        review_application(
            &store,
            &admin,
            &applicant.id,
            ReviewApplicationInput {
                status: "rejected".to_string(),
                rejection_reason: Some("unverifiable license".to_string()),
            },
        )
        .await
        .unwrap();

        let err = review_application(
            &store,
            &admin,
            &applicant.id,
            ReviewApplicationInput {
                status: "approved".to_string(),
                rejection_reason: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, QaError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_review_is_admin_only() {
        let store = MemoryStore::new();
        let applicant = seed_applicant(&store).await;
        let moderator = Caller::new(UserId::new(), Role::Moderator);

        let err = review_application(
            &store,
            &moderator,
            &applicant.id,
            ReviewApplicationInput {
                status: "approved".to_string(),
                rejection_reason: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, QaError::Authorization(_)));

        let err = list_applications(&store, &moderator, None).await.unwrap_err();
        assert!(matches!(err, QaError::Authorization(_)));

        let pending = list_applications(&store, &admin_caller(), None)
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
    }
}
