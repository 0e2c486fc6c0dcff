use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    domain::{
        entities::audio_projects::AudioProjectEntity,
        repositories::audio_projects::AudioProjectRepository,
        value_objects::access::SharedAccess,
    },
    infrastructure::memory::memory_database::MemoryDatabase,
};

pub struct AudioProjectMemory {
    db: Arc<MemoryDatabase>,
}

impl AudioProjectMemory {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AudioProjectRepository for AudioProjectMemory {
    async fn find_by_id(&self, project_id: Uuid) -> Result<Option<AudioProjectEntity>> {
        Ok(self.db.audio_projects.get(&project_id).await)
    }

    async fn list_visible_to(&self, user_id: Uuid) -> Result<Vec<AudioProjectEntity>> {
        let mut visible = self.db.audio_projects.filter(|entity| entity.can_view(user_id)).await;
        visible.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(visible)
    }

    async fn insert(&self, entity: AudioProjectEntity) -> Result<AudioProjectEntity> {
        self.db.audio_projects.insert(entity.id, entity.clone()).await;
        Ok(entity)
    }

    async fn update(&self, entity: AudioProjectEntity) -> Result<AudioProjectEntity> {
        if !self.db.audio_projects.replace(&entity.id, entity.clone()).await {
            bail!("audio project {} not found", entity.id);
        }
        Ok(entity)
    }

    async fn delete(&self, project_id: Uuid) -> Result<()> {
        if self.db.audio_projects.remove(&project_id).await.is_none() {
            bail!("audio project {} not found", project_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{
        access::Collaborative, enums::collaborator_roles::CollaboratorRole,
    };
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn lists_owned_shared_and_public_newest_first() {
        let repository = AudioProjectMemory::new(Arc::new(MemoryDatabase::new()));
        let me = Uuid::new_v4();
        let someone = Uuid::new_v4();
        let now = Utc::now();

        let mut mine = AudioProjectEntity::new(me, "mine".into(), now);
        mine.updated_at = now - Duration::minutes(3);
        let mut shared = AudioProjectEntity::new(someone, "shared".into(), now);
        shared
            .add_collaborator(me, CollaboratorRole::Viewer, now)
            .unwrap();
        shared.updated_at = now - Duration::minutes(1);
        let mut public = AudioProjectEntity::new(someone, "public".into(), now);
        public.is_public = true;
        public.updated_at = now - Duration::minutes(2);
        let hidden = AudioProjectEntity::new(someone, "hidden".into(), now);

        for project in [mine, shared, public, hidden] {
            repository.insert(project).await.unwrap();
        }

        let titles: Vec<_> = repository
            .list_visible_to(me)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["shared", "public", "mine"]);
    }

    #[tokio::test]
    async fn deleting_twice_fails() {
        let repository = AudioProjectMemory::new(Arc::new(MemoryDatabase::new()));
        let project = AudioProjectEntity::new(Uuid::new_v4(), "gone".into(), Utc::now());
        let id = repository.insert(project).await.unwrap().id;

        repository.delete(id).await.unwrap();
        assert!(repository.delete(id).await.is_err());
        assert!(repository.find_by_id(id).await.unwrap().is_none());
    }
}
