use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::value_objects::{
    access::{Collaborative, Collaborator, SharedAccess},
    enums::{
        project_statuses::ProjectStatus,
        video_formats::{
            MediaElementType, SceneBackgroundType, SceneTransitionType, VideoExportFormat,
            VideoQuality,
        },
    },
};

use super::audio_projects::EXPORT_BASE_URL;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneBackground {
    pub background_type: SceneBackgroundType,
    pub value: Option<String>,
    pub opacity: f64,
}

impl Default for SceneBackground {
    fn default() -> Self {
        Self {
            background_type: SceneBackgroundType::default(),
            value: None,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneTransition {
    pub transition_type: SceneTransitionType,
    pub duration: f64,
    #[serde(default)]
    pub settings: BTreeMap<String, Value>,
}

impl Default for SceneTransition {
    fn default() -> Self {
        Self {
            transition_type: SceneTransitionType::default(),
            duration: 1.0,
            settings: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoScene {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_time: f64,
    pub duration: f64,
    pub background: SceneBackground,
    pub transition: SceneTransition,
}

impl VideoScene {
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaElement {
    pub id: Uuid,
    pub media_type: MediaElementType,
    pub name: String,
    pub file_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub start_time: f64,
    pub duration: f64,
    pub opacity: f64,
    pub volume: f64,
    pub muted: bool,
    pub scene_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl From<VideoQuality> for Resolution {
    fn from(quality: VideoQuality) -> Self {
        let (width, height) = quality.resolution();
        Self { width, height }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoExportSettings {
    pub format: VideoExportFormat,
    pub quality: VideoQuality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedVideoFile {
    pub url: String,
    pub format: VideoExportFormat,
    pub quality: VideoQuality,
    pub duration: f64,
    pub file_size: u64,
    pub resolution: Resolution,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoProjectEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub collaborators: Vec<Collaborator>,
    pub is_public: bool,
    pub resolution: Resolution,
    pub frame_rate: u32,
    pub duration: f64,
    pub scenes: Vec<VideoScene>,
    pub media_elements: Vec<MediaElement>,
    pub export_settings: VideoExportSettings,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    pub exported_files: Vec<ExportedVideoFile>,
    pub status: ProjectStatus,
    pub last_opened: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VideoProjectEntity {
    pub fn new(owner_id: Uuid, title: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description: None,
            owner_id,
            collaborators: Vec::new(),
            is_public: false,
            resolution: VideoQuality::FullHd1080.into(),
            frame_rate: 30,
            duration: 0.0,
            scenes: Vec::new(),
            media_elements: Vec::new(),
            export_settings: VideoExportSettings::default(),
            tags: Vec::new(),
            cover_image: None,
            exported_files: Vec::new(),
            status: ProjectStatus::default(),
            last_opened: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Latest scene end, or 0 without scenes.
    pub fn recalculate_duration(&mut self) -> f64 {
        self.duration = self
            .scenes
            .iter()
            .map(VideoScene::end_time)
            .fold(0.0, f64::max);
        self.duration
    }

    pub fn has_scene(&self, scene_id: Uuid) -> bool {
        self.scenes.iter().any(|s| s.id == scene_id)
    }

    pub fn add_scene(&mut self, scene: VideoScene, now: DateTime<Utc>) -> &VideoScene {
        self.scenes.push(scene);
        self.recalculate_duration();
        self.updated_at = now;
        &self.scenes[self.scenes.len() - 1]
    }

    /// Removes the scene and every media element attached to it.
    pub fn remove_scene(&mut self, scene_id: Uuid, now: DateTime<Utc>) -> bool {
        if !self.has_scene(scene_id) {
            return false;
        }

        self.scenes.retain(|s| s.id != scene_id);
        self.media_elements
            .retain(|m| m.scene_id != Some(scene_id));
        self.recalculate_duration();
        self.updated_at = now;
        true
    }

    /// Returns `None` when the element points at a scene this project does not have.
    pub fn add_media_element(
        &mut self,
        element: MediaElement,
        now: DateTime<Utc>,
    ) -> Option<&MediaElement> {
        if let Some(scene_id) = element.scene_id {
            if !self.has_scene(scene_id) {
                return None;
            }
        }

        self.media_elements.push(element);
        self.updated_at = now;
        self.media_elements.last()
    }

    pub fn export(
        &mut self,
        format: Option<VideoExportFormat>,
        quality: Option<VideoQuality>,
        file_size: u64,
        now: DateTime<Utc>,
    ) -> ExportedVideoFile {
        if let Some(format) = format {
            self.export_settings.format = format;
        }
        if let Some(quality) = quality {
            self.export_settings.quality = quality;
        }

        let exported = ExportedVideoFile {
            url: format!(
                "{}/{}_{}.{}",
                EXPORT_BASE_URL,
                self.id,
                now.timestamp_millis(),
                self.export_settings.format
            ),
            format: self.export_settings.format,
            quality: self.export_settings.quality,
            duration: self.duration,
            file_size,
            resolution: self.export_settings.quality.into(),
            created_at: now,
        };

        self.exported_files.push(exported.clone());
        self.status = ProjectStatus::Completed;
        self.updated_at = now;
        exported
    }
}

impl SharedAccess for VideoProjectEntity {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn collaborators(&self) -> &[Collaborator] {
        &self.collaborators
    }

    fn is_public(&self) -> bool {
        self.is_public
    }
}

impl Collaborative for VideoProjectEntity {
    fn collaborators_mut(&mut self) -> &mut Vec<Collaborator> {
        &mut self.collaborators
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(start_time: f64, duration: f64) -> VideoScene {
        VideoScene {
            id: Uuid::new_v4(),
            name: "scene".to_string(),
            description: None,
            start_time,
            duration,
            background: SceneBackground::default(),
            transition: SceneTransition::default(),
        }
    }

    fn media(scene_id: Option<Uuid>) -> MediaElement {
        MediaElement {
            id: Uuid::new_v4(),
            media_type: MediaElementType::Image,
            name: "still".to_string(),
            file_url: Some("https://cdn.example/still.png".to_string()),
            thumbnail_url: None,
            start_time: 0.0,
            duration: 3.0,
            opacity: 1.0,
            volume: 1.0,
            muted: false,
            scene_id,
        }
    }

    fn project() -> VideoProjectEntity {
        VideoProjectEntity::new(Uuid::new_v4(), "Reel".to_string(), Utc::now())
    }

    #[test]
    fn removing_scene_cascades_to_its_media() {
        let mut project = project();
        let first = project.add_scene(scene(0.0, 10.0), Utc::now()).id;
        let second = project.add_scene(scene(10.0, 15.0), Utc::now()).id;
        project.add_media_element(media(Some(first)), Utc::now()).unwrap();
        project.add_media_element(media(Some(second)), Utc::now()).unwrap();
        project.add_media_element(media(None), Utc::now()).unwrap();
        assert_eq!(project.duration, 25.0);

        assert!(project.remove_scene(second, Utc::now()));

        assert_eq!(project.duration, 10.0);
        assert_eq!(project.media_elements.len(), 2);
        assert!(
            project
                .media_elements
                .iter()
                .all(|m| m.scene_id != Some(second))
        );
    }

    #[test]
    fn media_for_unknown_scene_is_rejected() {
        let mut project = project();
        assert!(
            project
                .add_media_element(media(Some(Uuid::new_v4())), Utc::now())
                .is_none()
        );
        assert!(project.media_elements.is_empty());
    }

    #[test]
    fn export_resolution_follows_quality() {
        let mut project = project();
        let file = project.export(None, Some(VideoQuality::Hd720), 0, Utc::now());

        assert_eq!(
            file.resolution,
            Resolution {
                width: 1280,
                height: 720
            }
        );
        assert_eq!(file.format, VideoExportFormat::Mp4);
        assert!(file.url.ends_with(".mp4"));
        assert_eq!(project.status, ProjectStatus::Completed);
    }
}
