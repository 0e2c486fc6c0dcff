use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    entities::users::normalize_email,
    repositories::users::UserRepository,
    value_objects::access::{AddCollaboratorRequest, Collaborative, Collaborator, SharedAccess},
};

use super::errors::{UseCaseError, UseCaseResult, bad_request, forbidden, not_found};

pub fn ensure_view(entity: &impl SharedAccess, user_id: Uuid, noun: &str) -> UseCaseResult<()> {
    if entity.can_view(user_id) {
        return Ok(());
    }
    Err(forbidden(format!("You do not have access to this {}", noun)))
}

pub fn ensure_edit(entity: &impl SharedAccess, user_id: Uuid, noun: &str) -> UseCaseResult<()> {
    if entity.can_edit(user_id) {
        return Ok(());
    }
    Err(forbidden(format!("You do not have permission to edit this {}", noun)))
}

pub fn ensure_export(entity: &impl SharedAccess, user_id: Uuid, noun: &str) -> UseCaseResult<()> {
    if entity.can_export(user_id) {
        return Ok(());
    }
    Err(forbidden(format!("You do not have access to this {}", noun)))
}

/// `action` completes "Only the owner can ..." in the rejection message.
pub fn ensure_owner(
    entity: &impl SharedAccess,
    user_id: Uuid,
    noun: &str,
    action: &str,
) -> UseCaseResult<()> {
    if entity.is_owner(user_id) {
        return Ok(());
    }
    Err(forbidden(format!("Only the {} owner can {}", noun, action)))
}

/// Looks the invitee up by email and attaches them to `entity`.
pub async fn invite_collaborator<U, E>(
    user_repository: &Arc<U>,
    entity: &mut E,
    request: AddCollaboratorRequest,
    now: DateTime<Utc>,
) -> UseCaseResult<Collaborator>
where
    U: UserRepository + Send + Sync + 'static,
    E: Collaborative,
{
    let email = normalize_email(&request.email);
    let invitee = user_repository
        .find_by_email(email.clone())
        .await?
        .ok_or_else(|| {
            warn!(%email, "access: collaborator email not found");
            not_found("No user found with this email")
        })?;

    if entity.is_owner(invitee.id) {
        return Err(bad_request("The owner cannot be added as a collaborator"));
    }

    entity
        .add_collaborator(invitee.id, request.role, now)
        .cloned()
        .map_err(|_| UseCaseError::Conflict("User is already a collaborator".to_string()))
}
