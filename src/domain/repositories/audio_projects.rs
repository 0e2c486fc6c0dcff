use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::audio_projects::AudioProjectEntity;

#[async_trait]
#[automock]
pub trait AudioProjectRepository {
    async fn find_by_id(&self, project_id: Uuid) -> Result<Option<AudioProjectEntity>>;
    /// Owned, shared with or public to `user_id`, most recently updated first.
    async fn list_visible_to(&self, user_id: Uuid) -> Result<Vec<AudioProjectEntity>>;
    async fn insert(&self, entity: AudioProjectEntity) -> Result<AudioProjectEntity>;
    async fn update(&self, entity: AudioProjectEntity) -> Result<AudioProjectEntity>;
    async fn delete(&self, project_id: Uuid) -> Result<()>;
}
