use serde::Deserialize;

use crate::domain::value_objects::{
    enums::three_d::{LightType, Object3DType, SceneCategory},
    geometry::{Vector3, unit_scale},
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSceneRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub category: SceneCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_template: bool,
}

fn visible() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddObjectRequest {
    pub name: String,
    #[serde(default)]
    pub object_type: Object3DType,
    pub model_url: Option<String>,
    #[serde(default)]
    pub position: Vector3,
    #[serde(default)]
    pub rotation: Vector3,
    #[serde(default = "unit_scale")]
    pub scale: Vector3,
    #[serde(default = "visible")]
    pub visible: bool,
    #[serde(default = "visible")]
    pub cast_shadow: bool,
    #[serde(default = "visible")]
    pub receive_shadow: bool,
    #[serde(default)]
    pub poly_count: u64,
    #[serde(default)]
    pub vertex_count: u64,
}

fn white() -> String {
    "#ffffff".to_string()
}

fn full_intensity() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddLightRequest {
    pub name: String,
    #[serde(default)]
    pub light_type: LightType,
    #[serde(default = "white")]
    pub color: String,
    #[serde(default = "full_intensity")]
    pub intensity: f64,
    #[serde(default)]
    pub position: Vector3,
    #[serde(default)]
    pub rotation: Vector3,
    #[serde(default = "visible")]
    pub cast_shadow: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloneRequest {
    pub name: Option<String>,
}
