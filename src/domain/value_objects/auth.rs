use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::users::{
        AccountUsage, NotificationPreferences, Preferences, Subscription, UserEntity,
    },
    value_objects::enums::{
        user_roles::{AudioQualityPreference, Theme, UserRole},
        video_formats::VideoQuality,
    },
};

/// Payload of a signed session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_developer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Standard,
    Developer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DevLoginRequest {
    pub email: String,
    pub dev_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencesPatch {
    pub theme: Option<Theme>,
    pub language: Option<String>,
    pub notifications: Option<NotificationPreferences>,
    pub audio_quality: Option<AudioQualityPreference>,
    pub video_quality: Option<VideoQuality>,
}

impl PreferencesPatch {
    pub fn apply(self, preferences: &mut Preferences) {
        if let Some(theme) = self.theme {
            preferences.theme = theme;
        }
        if let Some(language) = self.language {
            preferences.language = language;
        }
        if let Some(notifications) = self.notifications {
            preferences.notifications = notifications;
        }
        if let Some(audio_quality) = self.audio_quality {
            preferences.audio_quality = audio_quality;
        }
        if let Some(video_quality) = self.video_quality {
            preferences.video_quality = video_quality;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub preferences: Option<PreferencesPatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfileDto {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub role: UserRole,
    pub is_verified: bool,
    pub subscription: Subscription,
    pub preferences: Preferences,
    pub usage: AccountUsage,
    pub created_at: DateTime<Utc>,
}

impl From<&UserEntity> for UserProfileDto {
    fn from(user: &UserEntity) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            avatar: user.avatar.clone(),
            role: user.role,
            is_verified: user.is_verified,
            subscription: user.subscription.clone(),
            preferences: user.preferences.clone(),
            usage: user.usage.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthDto {
    pub token: String,
    pub user: UserProfileDto,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_developer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
