use serde::Deserialize;

use crate::domain::{
    entities::avatars_3d::TextureResolution,
    value_objects::enums::three_d::{AnimationCategory, AvatarCategory, AvatarFormat, TextureType},
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAvatarRequest {
    pub name: String,
    pub description: Option<String>,
    pub model_url: String,
    #[serde(default)]
    pub category: AvatarCategory,
    #[serde(default)]
    pub format: AvatarFormat,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_template: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddAnimationRequest {
    pub name: String,
    #[serde(default)]
    pub category: AnimationCategory,
    pub file_url: String,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub loopable: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTextureRequest {
    pub name: String,
    #[serde(default)]
    pub texture_type: TextureType,
    pub file_url: String,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub resolution: TextureResolution,
}
