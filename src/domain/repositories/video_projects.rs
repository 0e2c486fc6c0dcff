use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::video_projects::VideoProjectEntity;

#[async_trait]
#[automock]
pub trait VideoProjectRepository {
    async fn find_by_id(&self, project_id: Uuid) -> Result<Option<VideoProjectEntity>>;
    /// Owned, shared with or public to `user_id`, most recently updated first.
    async fn list_visible_to(&self, user_id: Uuid) -> Result<Vec<VideoProjectEntity>>;
    async fn insert(&self, entity: VideoProjectEntity) -> Result<VideoProjectEntity>;
    async fn update(&self, entity: VideoProjectEntity) -> Result<VideoProjectEntity>;
    async fn delete(&self, project_id: Uuid) -> Result<()>;
}
