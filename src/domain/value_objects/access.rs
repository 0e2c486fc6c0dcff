use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::enums::collaborator_roles::CollaboratorRole;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collaborator {
    pub user_id: Uuid,
    pub role: CollaboratorRole,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddCollaboratorRequest {
    pub email: String,
    #[serde(default)]
    pub role: CollaboratorRole,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("user {0} is already a collaborator")]
pub struct DuplicateCollaborator(pub Uuid);

/// Ownership and sharing rules common to every user-owned aggregate.
pub trait SharedAccess {
    fn owner_id(&self) -> Uuid;
    fn collaborators(&self) -> &[Collaborator];
    fn is_public(&self) -> bool;

    fn is_owner(&self, user_id: Uuid) -> bool {
        self.owner_id() == user_id
    }

    fn collaborator_role(&self, user_id: Uuid) -> Option<CollaboratorRole> {
        self.collaborators()
            .iter()
            .find(|c| c.user_id == user_id)
            .map(|c| c.role)
    }

    fn is_collaborator(&self, user_id: Uuid) -> bool {
        self.collaborator_role(user_id).is_some()
    }

    fn can_view(&self, user_id: Uuid) -> bool {
        self.is_owner(user_id) || self.is_collaborator(user_id) || self.is_public()
    }

    fn can_edit(&self, user_id: Uuid) -> bool {
        self.is_owner(user_id)
            || self.collaborator_role(user_id) == Some(CollaboratorRole::Editor)
    }

    fn can_export(&self, user_id: Uuid) -> bool {
        self.is_owner(user_id) || self.is_collaborator(user_id)
    }
}

/// Aggregates whose owner can share them with other users.
pub trait Collaborative: SharedAccess {
    fn collaborators_mut(&mut self) -> &mut Vec<Collaborator>;

    fn add_collaborator(
        &mut self,
        user_id: Uuid,
        role: CollaboratorRole,
        now: DateTime<Utc>,
    ) -> Result<&Collaborator, DuplicateCollaborator> {
        if self.is_collaborator(user_id) {
            return Err(DuplicateCollaborator(user_id));
        }

        let collaborators = self.collaborators_mut();
        collaborators.push(Collaborator {
            user_id,
            role,
            added_at: now,
        });
        Ok(&collaborators[collaborators.len() - 1])
    }

    /// Returns whether a collaborator was removed. Removing an absent user is a no-op.
    fn remove_collaborator(&mut self, user_id: Uuid) -> bool {
        let collaborators = self.collaborators_mut();
        let before = collaborators.len();
        collaborators.retain(|c| c.user_id != user_id);
        collaborators.len() != before
    }
}
