use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::stream_sessions::StreamSessionEntity;

#[async_trait]
#[automock]
pub trait StreamSessionRepository {
    async fn find_by_id(&self, stream_id: Uuid) -> Result<Option<StreamSessionEntity>>;
    /// Owned, shared with or public to `user_id`, most recently updated first.
    async fn list_visible_to(&self, user_id: Uuid) -> Result<Vec<StreamSessionEntity>>;
    async fn insert(&self, entity: StreamSessionEntity) -> Result<StreamSessionEntity>;
    async fn update(&self, entity: StreamSessionEntity) -> Result<StreamSessionEntity>;
    async fn delete(&self, stream_id: Uuid) -> Result<()>;
}
