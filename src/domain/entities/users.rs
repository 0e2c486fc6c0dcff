use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::{
    subscription_tiers::SubscriptionTier,
    user_roles::{AudioQualityPreference, SubscriptionStatus, Theme, UserRole},
    video_formats::VideoQuality,
};

pub const DEFAULT_AI_CREDITS: i64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub role: UserRole,
    pub is_verified: bool,
    pub verification_token: Option<String>,
    pub verification_token_expires: Option<DateTime<Utc>>,
    pub reset_password_token: Option<String>,
    pub reset_password_expires: Option<DateTime<Utc>>,
    pub subscription: Subscription,
    pub preferences: Preferences,
    pub usage: AccountUsage,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub plan: SubscriptionTier,
    pub status: SubscriptionStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub language: String,
    pub notifications: NotificationPreferences,
    pub audio_quality: AudioQualityPreference,
    pub video_quality: VideoQuality,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: "en".to_string(),
            notifications: NotificationPreferences::default(),
            audio_quality: AudioQualityPreference::default(),
            video_quality: VideoQuality::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub email: bool,
    pub push: bool,
    pub marketing: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            marketing: false,
        }
    }
}

/// Storage consumption in bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageUsage {
    pub audio: u64,
    pub video: u64,
    pub models: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountUsage {
    pub storage: StorageUsage,
    pub ai_credits: i64,
    pub last_login: Option<DateTime<Utc>>,
    pub login_count: u64,
}

impl Default for AccountUsage {
    fn default() -> Self {
        Self {
            storage: StorageUsage::default(),
            ai_credits: DEFAULT_AI_CREDITS,
            last_login: None,
            login_count: 0,
        }
    }
}

impl UserEntity {
    pub fn new(
        email: &str,
        password_hash: String,
        display_name: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            password_hash,
            display_name,
            avatar: None,
            role: UserRole::default(),
            is_verified: false,
            verification_token: None,
            verification_token_expires: None,
            reset_password_token: None,
            reset_password_expires: None,
            subscription: Subscription {
                start_date: Some(now),
                ..Subscription::default()
            },
            preferences: Preferences::default(),
            usage: AccountUsage::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn tier(&self) -> SubscriptionTier {
        self.subscription.plan
    }

    pub fn record_login(&mut self, now: DateTime<Utc>) {
        self.usage.last_login = Some(now);
        self.usage.login_count += 1;
        self.updated_at = now;
    }

    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.is_verified = true;
        self.verification_token = None;
        self.verification_token_expires = None;
        self.updated_at = now;
    }

    pub fn clear_reset_token(&mut self) {
        self.reset_password_token = None;
        self.reset_password_expires = None;
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_starts_on_free_tier_with_default_credits() {
        let user = UserEntity::new(
            "  Jane@Example.COM ",
            "hash".to_string(),
            "Jane".to_string(),
            Utc::now(),
        );

        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.tier(), SubscriptionTier::Free);
        assert_eq!(user.usage.ai_credits, DEFAULT_AI_CREDITS);
        assert_eq!(user.role, UserRole::User);
        assert!(!user.is_verified);
    }

    #[test]
    fn login_is_counted() {
        let mut user = UserEntity::new("a@b.io", "hash".into(), "Al".into(), Utc::now());
        let now = Utc::now();
        user.record_login(now);
        user.record_login(now);

        assert_eq!(user.usage.login_count, 2);
        assert_eq!(user.usage.last_login, Some(now));
    }
}
