use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::ai_models::AiModelEntity,
    value_objects::{
        ai_models::AiModelFilter,
        usage::{UsageSample, UsageStats},
    },
};

#[async_trait]
#[automock]
pub trait AiModelRepository {
    async fn find_by_id(&self, model_id: Uuid) -> Result<Option<AiModelEntity>>;
    async fn list(&self, filter: AiModelFilter) -> Result<Vec<AiModelEntity>>;
    async fn insert(&self, model: AiModelEntity) -> Result<AiModelEntity>;
    async fn record_usage(
        &self,
        model_id: Uuid,
        user_id: Uuid,
        sample: UsageSample,
    ) -> Result<UsageStats>;
}
