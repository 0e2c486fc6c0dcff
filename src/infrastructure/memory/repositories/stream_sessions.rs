use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    domain::{
        entities::stream_sessions::StreamSessionEntity,
        repositories::stream_sessions::StreamSessionRepository,
        value_objects::access::SharedAccess,
    },
    infrastructure::memory::memory_database::MemoryDatabase,
};

pub struct StreamSessionMemory {
    db: Arc<MemoryDatabase>,
}

impl StreamSessionMemory {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StreamSessionRepository for StreamSessionMemory {
    async fn find_by_id(&self, stream_id: Uuid) -> Result<Option<StreamSessionEntity>> {
        Ok(self.db.streams.get(&stream_id).await)
    }

    async fn list_visible_to(&self, user_id: Uuid) -> Result<Vec<StreamSessionEntity>> {
        let mut visible = self.db.streams.filter(|entity| entity.can_view(user_id)).await;
        visible.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(visible)
    }

    async fn insert(&self, entity: StreamSessionEntity) -> Result<StreamSessionEntity> {
        self.db.streams.insert(entity.id, entity.clone()).await;
        Ok(entity)
    }

    async fn update(&self, entity: StreamSessionEntity) -> Result<StreamSessionEntity> {
        if !self.db.streams.replace(&entity.id, entity.clone()).await {
            bail!("stream {} not found", entity.id);
        }
        Ok(entity)
    }

    async fn delete(&self, stream_id: Uuid) -> Result<()> {
        if self.db.streams.remove(&stream_id).await.is_none() {
            bail!("stream {} not found", stream_id);
        }
        Ok(())
    }
}
