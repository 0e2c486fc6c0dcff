use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::ai_models::AiModelEntity,
    value_objects::enums::{
        ai_model_types::{AiModelCategory, AiModelType, AiProvider},
        subscription_tiers::SubscriptionTier,
    },
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AiModelFilter {
    pub category: Option<AiModelCategory>,
    #[serde(rename = "type")]
    pub model_type: Option<AiModelType>,
    pub featured: Option<bool>,
    #[serde(skip)]
    pub active: Option<bool>,
}

impl AiModelFilter {
    pub fn matches(&self, model: &AiModelEntity) -> bool {
        self.category.is_none_or(|c| c == model.category)
            && self.model_type.is_none_or(|t| t == model.model_type)
            && self.featured.is_none_or(|f| f == model.is_featured)
            && self.active.is_none_or(|a| a == model.is_active)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiModelSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub model_type: AiModelType,
    pub category: AiModelCategory,
    pub provider: AiProvider,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub credits_per_use: i64,
    pub min_user_level: SubscriptionTier,
}

impl From<&AiModelEntity> for AiModelSummaryDto {
    fn from(model: &AiModelEntity) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            display_name: model.display_name.clone(),
            description: model.description.clone(),
            model_type: model.model_type,
            category: model.category,
            provider: model.provider,
            tags: model.tags.clone(),
            is_featured: model.is_featured,
            credits_per_use: model.credits_per_use,
            min_user_level: model.restrictions.min_user_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiModelDetailDto {
    #[serde(flatten)]
    pub summary: AiModelSummaryDto,
    pub current_version: String,
    pub cost_per_use: f64,
    pub max_daily_uses: Option<u32>,
    pub total_usage: u64,
    pub average_processing_time: f64,
}

impl From<&AiModelEntity> for AiModelDetailDto {
    fn from(model: &AiModelEntity) -> Self {
        Self {
            summary: model.into(),
            current_version: model.current_version.clone(),
            cost_per_use: model.cost_per_use,
            max_daily_uses: model.restrictions.max_daily_uses,
            total_usage: model.usage_stats.total_usage,
            average_processing_time: model.usage_stats.average_processing_time,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    pub model_id: Option<Uuid>,
    pub prompt: Option<String>,
    #[serde(default)]
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRefDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationOutput {
    Text { text: String },
    Image { image_url: String },
    Audio { audio_url: String, duration: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationDto {
    #[serde(flatten)]
    pub output: GenerationOutput,
    pub model: ModelRefDto,
    pub prompt: String,
    /// Milliseconds.
    pub processing_time: u64,
    pub credits_used: i64,
    pub remaining_credits: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditsDto {
    pub credits: i64,
    pub subscription: SubscriptionTier,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseCreditsRequest {
    pub amount: i64,
}
