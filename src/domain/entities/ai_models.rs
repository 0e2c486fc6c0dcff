use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{
    enums::{
        ai_model_types::{AiModelCategory, AiModelType, AiProvider},
        subscription_tiers::SubscriptionTier,
    },
    usage::UsageStats,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiModelEntity {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub model_type: AiModelType,
    pub category: AiModelCategory,
    pub provider: AiProvider,
    pub current_version: String,
    pub tags: Vec<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub credits_per_use: i64,
    pub cost_per_use: f64,
    pub restrictions: ModelRestrictions,
    pub usage_stats: UsageStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelRestrictions {
    pub min_user_level: SubscriptionTier,
    pub max_daily_uses: Option<u32>,
    pub requires_approval: bool,
}

impl AiModelEntity {
    pub fn required_tier(&self) -> SubscriptionTier {
        self.restrictions.min_user_level
    }
}
