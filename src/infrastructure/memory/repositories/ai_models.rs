use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::ai_models::AiModelEntity,
        repositories::ai_models::AiModelRepository,
        value_objects::{
            ai_models::AiModelFilter,
            usage::{UsageSample, UsageStats},
        },
    },
    infrastructure::memory::memory_database::MemoryDatabase,
};

pub struct AiModelMemory {
    db: Arc<MemoryDatabase>,
}

impl AiModelMemory {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AiModelRepository for AiModelMemory {
    async fn find_by_id(&self, model_id: Uuid) -> Result<Option<AiModelEntity>> {
        Ok(self.db.ai_models.get(&model_id).await)
    }

    async fn list(&self, filter: AiModelFilter) -> Result<Vec<AiModelEntity>> {
        Ok(self.db.ai_models.filter(|model| filter.matches(model)).await)
    }

    async fn insert(&self, model: AiModelEntity) -> Result<AiModelEntity> {
        if self.db.ai_models.find(|m| m.name == model.name).await.is_some() {
            bail!("AI model {} already exists", model.name);
        }
        self.db.ai_models.insert(model.id, model.clone()).await;
        Ok(model)
    }

    async fn record_usage(
        &self,
        model_id: Uuid,
        user_id: Uuid,
        sample: UsageSample,
    ) -> Result<UsageStats> {
        let stats = self
            .db
            .ai_models
            .try_update(&model_id, |model| {
                let now = Utc::now();
                model.usage_stats.record(user_id, sample, now);
                model.updated_at = now;
                Ok::<_, ()>(model.usage_stats.clone())
            })
            .await;

        match stats {
            Some(Ok(stats)) => Ok(stats),
            _ => bail!("AI model {} not found", model_id),
        }
    }
}
