use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::scenes_3d::Scene3DEntity;

#[async_trait]
#[automock]
pub trait Scene3DRepository {
    async fn find_by_id(&self, scene_id: Uuid) -> Result<Option<Scene3DEntity>>;
    /// Owned, shared with or public to `user_id`, most recently updated first.
    async fn list_visible_to(&self, user_id: Uuid) -> Result<Vec<Scene3DEntity>>;
    async fn insert(&self, entity: Scene3DEntity) -> Result<Scene3DEntity>;
    async fn update(&self, entity: Scene3DEntity) -> Result<Scene3DEntity>;
    async fn delete(&self, scene_id: Uuid) -> Result<()>;
}
