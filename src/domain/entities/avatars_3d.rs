use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{
    access::{Collaborator, SharedAccess},
    enums::{
        project_statuses::ProjectStatus,
        three_d::{AnimationCategory, AvatarCategory, AvatarFormat, TextureType},
    },
    geometry::Vector3,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarAnimation {
    pub id: Uuid,
    pub name: String,
    pub category: AnimationCategory,
    pub file_url: String,
    pub thumbnail_url: Option<String>,
    /// Seconds.
    pub duration: f64,
    pub loopable: bool,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureResolution {
    pub width: u32,
    pub height: u32,
}

impl Default for TextureResolution {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarTexture {
    pub id: Uuid,
    pub name: String,
    pub texture_type: TextureType,
    pub file_url: String,
    pub thumbnail_url: Option<String>,
    pub resolution: TextureResolution,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AvatarMetadata {
    pub poly_count: u64,
    pub vertex_count: u64,
    pub texture_count: usize,
    pub animation_count: usize,
    pub file_size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar3DEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub is_public: bool,
    pub is_template: bool,
    pub category: AvatarCategory,
    pub thumbnail_url: Option<String>,
    pub model_url: String,
    pub format: AvatarFormat,
    pub scale: Vector3,
    pub rigged: bool,
    pub animations: Vec<AvatarAnimation>,
    pub textures: Vec<AvatarTexture>,
    pub metadata: AvatarMetadata,
    pub tags: Vec<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Avatar3DEntity {
    pub fn new(owner_id: Uuid, name: String, model_url: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description: None,
            owner_id,
            is_public: false,
            is_template: false,
            category: AvatarCategory::default(),
            thumbnail_url: None,
            model_url,
            format: AvatarFormat::default(),
            scale: Vector3::ONE,
            rigged: true,
            animations: Vec::new(),
            textures: Vec::new(),
            metadata: AvatarMetadata::default(),
            tags: Vec::new(),
            status: ProjectStatus::Completed,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_animation(
        &mut self,
        animation: AvatarAnimation,
        now: DateTime<Utc>,
    ) -> &AvatarAnimation {
        self.animations.push(animation);
        self.metadata.animation_count = self.animations.len();
        self.updated_at = now;
        &self.animations[self.animations.len() - 1]
    }

    pub fn add_texture(&mut self, texture: AvatarTexture, now: DateTime<Utc>) -> &AvatarTexture {
        self.textures.push(texture);
        self.metadata.texture_count = self.textures.len();
        self.updated_at = now;
        &self.textures[self.textures.len() - 1]
    }

    pub fn clone_for(&self, owner_id: Uuid, name: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.unwrap_or_else(|| format!("{} (Clone)", self.name)),
            owner_id,
            is_public: false,
            is_template: false,
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }
}

// Avatars are never shared; only the owner and the public flag grant access.
impl SharedAccess for Avatar3DEntity {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn collaborators(&self) -> &[Collaborator] {
        &[]
    }

    fn is_public(&self) -> bool {
        self.is_public
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avatar() -> Avatar3DEntity {
        Avatar3DEntity::new(
            Uuid::new_v4(),
            "Robo".to_string(),
            "https://cdn.example/robo.glb".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn counters_follow_children() {
        let mut avatar = avatar();
        avatar.add_animation(
            AvatarAnimation {
                id: Uuid::new_v4(),
                name: "wave".to_string(),
                category: AnimationCategory::Gesture,
                file_url: "https://cdn.example/wave.fbx".to_string(),
                thumbnail_url: None,
                duration: 2.5,
                loopable: false,
                tags: Vec::new(),
            },
            Utc::now(),
        );
        avatar.add_texture(
            AvatarTexture {
                id: Uuid::new_v4(),
                name: "skin".to_string(),
                texture_type: TextureType::Diffuse,
                file_url: "https://cdn.example/skin.png".to_string(),
                thumbnail_url: None,
                resolution: TextureResolution::default(),
            },
            Utc::now(),
        );

        assert_eq!(avatar.metadata.animation_count, 1);
        assert_eq!(avatar.metadata.texture_count, 1);
    }

    #[test]
    fn clone_keeps_given_name() {
        let mut source = avatar();
        source.is_public = true;
        let owner = Uuid::new_v4();

        let copy = source.clone_for(owner, Some("Mine".to_string()), Utc::now());

        assert_eq!(copy.name, "Mine");
        assert_eq!(copy.owner_id, owner);
        assert!(!copy.is_public);
        assert!(copy.can_view(owner));
        assert!(!copy.can_view(source.owner_id));
    }
}
