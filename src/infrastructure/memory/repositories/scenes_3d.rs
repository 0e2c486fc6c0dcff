use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    domain::{
        entities::scenes_3d::Scene3DEntity,
        repositories::scenes_3d::Scene3DRepository,
        value_objects::access::SharedAccess,
    },
    infrastructure::memory::memory_database::MemoryDatabase,
};

pub struct Scene3DMemory {
    db: Arc<MemoryDatabase>,
}

impl Scene3DMemory {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Scene3DRepository for Scene3DMemory {
    async fn find_by_id(&self, scene_id: Uuid) -> Result<Option<Scene3DEntity>> {
        Ok(self.db.scenes.get(&scene_id).await)
    }

    async fn list_visible_to(&self, user_id: Uuid) -> Result<Vec<Scene3DEntity>> {
        let mut visible = self.db.scenes.filter(|entity| entity.can_view(user_id)).await;
        visible.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(visible)
    }

    async fn insert(&self, entity: Scene3DEntity) -> Result<Scene3DEntity> {
        self.db.scenes.insert(entity.id, entity.clone()).await;
        Ok(entity)
    }

    async fn update(&self, entity: Scene3DEntity) -> Result<Scene3DEntity> {
        if !self.db.scenes.replace(&entity.id, entity.clone()).await {
            bail!("scene {} not found", entity.id);
        }
        Ok(entity)
    }

    async fn delete(&self, scene_id: Uuid) -> Result<()> {
        if self.db.scenes.remove(&scene_id).await.is_none() {
            bail!("scene {} not found", scene_id);
        }
        Ok(())
    }
}
