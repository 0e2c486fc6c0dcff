use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{
    entities::video_projects::{SceneBackground, SceneTransition, VideoExportSettings},
    value_objects::enums::video_formats::{MediaElementType, VideoExportFormat, VideoQuality},
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateVideoProjectRequest {
    pub title: String,
    pub description: Option<String>,
    pub quality: Option<VideoQuality>,
    pub frame_rate: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVideoProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub frame_rate: Option<u32>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
    pub cover_image: Option<String>,
    pub export_settings: Option<VideoExportSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddSceneRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub start_time: f64,
    pub duration: f64,
    #[serde(default)]
    pub background: SceneBackground,
    #[serde(default)]
    pub transition: SceneTransition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddMediaElementRequest {
    pub media_type: MediaElementType,
    pub name: String,
    pub file_url: Option<String>,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub start_time: f64,
    pub duration: f64,
    pub opacity: Option<f64>,
    pub volume: Option<f64>,
    #[serde(default)]
    pub muted: bool,
    pub scene_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoExportRequest {
    pub format: Option<VideoExportFormat>,
    pub quality: Option<VideoQuality>,
}
