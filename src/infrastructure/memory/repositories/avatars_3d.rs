use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    domain::{
        entities::avatars_3d::Avatar3DEntity,
        repositories::avatars_3d::Avatar3DRepository,
        value_objects::access::SharedAccess,
    },
    infrastructure::memory::memory_database::MemoryDatabase,
};

pub struct Avatar3DMemory {
    db: Arc<MemoryDatabase>,
}

impl Avatar3DMemory {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Avatar3DRepository for Avatar3DMemory {
    async fn find_by_id(&self, avatar_id: Uuid) -> Result<Option<Avatar3DEntity>> {
        Ok(self.db.avatars.get(&avatar_id).await)
    }

    async fn list_visible_to(&self, user_id: Uuid) -> Result<Vec<Avatar3DEntity>> {
        let mut visible = self.db.avatars.filter(|entity| entity.can_view(user_id)).await;
        visible.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(visible)
    }

    async fn insert(&self, entity: Avatar3DEntity) -> Result<Avatar3DEntity> {
        self.db.avatars.insert(entity.id, entity.clone()).await;
        Ok(entity)
    }

    async fn update(&self, entity: Avatar3DEntity) -> Result<Avatar3DEntity> {
        if !self.db.avatars.replace(&entity.id, entity.clone()).await {
            bail!("avatar {} not found", entity.id);
        }
        Ok(entity)
    }

    async fn delete(&self, avatar_id: Uuid) -> Result<()> {
        if self.db.avatars.remove(&avatar_id).await.is_none() {
            bail!("avatar {} not found", avatar_id);
        }
        Ok(())
    }
}
