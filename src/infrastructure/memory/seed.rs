use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::{
    config::config_model::Seed,
    domain::{
        entities::{
            ai_models::{AiModelEntity, ModelRestrictions},
            users::{UserEntity, normalize_email},
        },
        value_objects::{
            enums::{
                ai_model_types::{AiModelCategory, AiModelType, AiProvider},
                subscription_tiers::SubscriptionTier,
                user_roles::UserRole,
            },
            usage::UsageStats,
        },
    },
    infrastructure::security::passwords::hash_password,
};

use super::memory_database::MemoryDatabase;

const ADMIN_CREDITS: i64 = 1000;

/// Inserts the admin account and the starter model catalog when they are missing.
pub async fn seed(db: &Arc<MemoryDatabase>, config: &Seed) -> Result<()> {
    let email = normalize_email(&config.admin_email);

    if db.users.find(|user| user.email == email).await.is_none() {
        let now = Utc::now();
        let mut admin = UserEntity::new(
            &email,
            hash_password(&config.admin_password)?,
            "Admin".to_string(),
            now,
        );
        admin.role = UserRole::Admin;
        admin.is_verified = true;
        admin.subscription.plan = SubscriptionTier::Enterprise;
        admin.usage.ai_credits = ADMIN_CREDITS;

        let admin_id = admin.id;
        db.users.insert(admin_id, admin).await;
        info!(user_id = %admin_id, %email, "seed: admin account created");
    }

    if db.ai_models.is_empty().await {
        let models = sample_models(Utc::now());
        let count = models.len();
        for model in models {
            db.ai_models.insert(model.id, model).await;
        }
        info!(count, "seed: sample AI models created");
    }

    Ok(())
}

pub fn sample_models(now: DateTime<Utc>) -> Vec<AiModelEntity> {
    vec![
        starter_model(
            "text-gen-basic",
            "TextGen Basic",
            "Basic text generation model for general purpose use",
            AiModelType::TextGeneration,
            AiModelCategory::Text,
            &["text", "generation", "basic"],
            true,
            50,
            now,
        ),
        starter_model(
            "image-gen-basic",
            "ImageGen Basic",
            "Basic image generation model for creating images from text descriptions",
            AiModelType::ImageGeneration,
            AiModelCategory::Image,
            &["image", "generation", "basic"],
            false,
            20,
            now,
        ),
        starter_model(
            "tts-basic",
            "Text-to-Speech Basic",
            "Basic text-to-speech model for converting text to natural-sounding speech",
            AiModelType::TextToSpeech,
            AiModelCategory::Audio,
            &["audio", "speech", "tts", "basic"],
            false,
            30,
            now,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn starter_model(
    name: &str,
    display_name: &str,
    description: &str,
    model_type: AiModelType,
    category: AiModelCategory,
    tags: &[&str],
    is_featured: bool,
    max_daily_uses: u32,
    now: DateTime<Utc>,
) -> AiModelEntity {
    let (credits_per_use, cost_per_use) = match model_type {
        AiModelType::ImageGeneration => (2, 0.02),
        _ => (1, 0.01),
    };

    AiModelEntity {
        id: Uuid::new_v4(),
        name: name.to_string(),
        display_name: display_name.to_string(),
        description: description.to_string(),
        model_type,
        category,
        provider: AiProvider::Internal,
        current_version: "1.0.0".to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        is_active: true,
        is_featured,
        credits_per_use,
        cost_per_use,
        restrictions: ModelRestrictions {
            min_user_level: SubscriptionTier::Free,
            max_daily_uses: Some(max_daily_uses),
            requires_approval: false,
        },
        usage_stats: UsageStats::default(),
        created_at: now,
        updated_at: now,
    }
}
