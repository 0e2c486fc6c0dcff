use serde::Deserialize;

use crate::domain::{
    entities::audio_projects::{AudioEffect, AudioExportSettings, MasterSettings},
    value_objects::enums::audio_formats::{AudioExportFormat, AudioExportQuality, TrackType},
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAudioProjectRequest {
    pub title: String,
    pub description: Option<String>,
    pub bpm: Option<u32>,
    pub key: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAudioProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub bpm: Option<u32>,
    pub key: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
    pub cover_image: Option<String>,
    pub master_settings: Option<MasterSettings>,
    pub export_settings: Option<AudioExportSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTrackRequest {
    pub name: String,
    #[serde(default)]
    pub track_type: TrackType,
    pub file_url: String,
    pub waveform_url: Option<String>,
    pub duration: f64,
    #[serde(default)]
    pub start_time: f64,
    pub volume: Option<f64>,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub solo: bool,
    #[serde(default)]
    pub effects: Vec<AudioEffect>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioExportRequest {
    pub format: Option<AudioExportFormat>,
    pub quality: Option<AudioExportQuality>,
}
