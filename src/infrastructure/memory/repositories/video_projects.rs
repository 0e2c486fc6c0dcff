use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    domain::{
        entities::video_projects::VideoProjectEntity,
        repositories::video_projects::VideoProjectRepository,
        value_objects::access::SharedAccess,
    },
    infrastructure::memory::memory_database::MemoryDatabase,
};

pub struct VideoProjectMemory {
    db: Arc<MemoryDatabase>,
}

impl VideoProjectMemory {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VideoProjectRepository for VideoProjectMemory {
    async fn find_by_id(&self, project_id: Uuid) -> Result<Option<VideoProjectEntity>> {
        Ok(self.db.video_projects.get(&project_id).await)
    }

    async fn list_visible_to(&self, user_id: Uuid) -> Result<Vec<VideoProjectEntity>> {
        let mut visible = self.db.video_projects.filter(|entity| entity.can_view(user_id)).await;
        visible.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(visible)
    }

    async fn insert(&self, entity: VideoProjectEntity) -> Result<VideoProjectEntity> {
        self.db.video_projects.insert(entity.id, entity.clone()).await;
        Ok(entity)
    }

    async fn update(&self, entity: VideoProjectEntity) -> Result<VideoProjectEntity> {
        if !self.db.video_projects.replace(&entity.id, entity.clone()).await {
            bail!("video project {} not found", entity.id);
        }
        Ok(entity)
    }

    async fn delete(&self, project_id: Uuid) -> Result<()> {
        if self.db.video_projects.remove(&project_id).await.is_none() {
            bail!("video project {} not found", project_id);
        }
        Ok(())
    }
}
