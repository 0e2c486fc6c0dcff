use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::avatars_3d::Avatar3DEntity;

#[async_trait]
#[automock]
pub trait Avatar3DRepository {
    async fn find_by_id(&self, avatar_id: Uuid) -> Result<Option<Avatar3DEntity>>;
    /// Owned, shared with or public to `user_id`, most recently updated first.
    async fn list_visible_to(&self, user_id: Uuid) -> Result<Vec<Avatar3DEntity>>;
    async fn insert(&self, entity: Avatar3DEntity) -> Result<Avatar3DEntity>;
    async fn update(&self, entity: Avatar3DEntity) -> Result<Avatar3DEntity>;
    async fn delete(&self, avatar_id: Uuid) -> Result<()>;
}
