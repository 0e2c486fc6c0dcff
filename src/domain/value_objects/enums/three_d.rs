use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Object3DType {
    #[default]
    Model,
    Primitive,
    Avatar,
    Particle,
    Group,
    AiGenerated,
    Custom,
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LightType {
    Ambient,
    Directional,
    #[default]
    Point,
    Spot,
    Area,
    Hemisphere,
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SceneCategory {
    Interior,
    Exterior,
    Landscape,
    Abstract,
    Fantasy,
    Scifi,
    #[default]
    Other,
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AvatarCategory {
    #[default]
    Human,
    Animal,
    Fantasy,
    Robot,
    Abstract,
    Other,
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AvatarFormat {
    #[default]
    Glb,
    Gltf,
    Fbx,
    Obj,
    Custom,
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnimationCategory {
    Idle,
    Walk,
    Run,
    Talk,
    Dance,
    Gesture,
    Emotion,
    #[default]
    Custom,
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextureType {
    #[default]
    Diffuse,
    Normal,
    Specular,
    Roughness,
    Metallic,
    Emissive,
    Ao,
    Height,
    Custom,
}
