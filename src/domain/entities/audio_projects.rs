use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::value_objects::{
    access::{Collaborative, Collaborator, SharedAccess},
    enums::{
        audio_formats::{AudioEffectType, AudioExportFormat, AudioExportQuality, TrackType},
        project_statuses::ProjectStatus,
    },
};

pub const DEFAULT_BPM: u32 = 120;
pub const EXPORT_BASE_URL: &str = "https://storage.edaivi.com/exports";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioEffect {
    pub effect_type: AudioEffectType,
    #[serde(default)]
    pub settings: BTreeMap<String, Value>,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioTrack {
    pub id: Uuid,
    pub name: String,
    pub track_type: TrackType,
    pub file_url: String,
    pub waveform_url: Option<String>,
    pub duration: f64,
    pub start_time: f64,
    /// Gain multiplier, 0.0 to 2.0.
    pub volume: f64,
    pub muted: bool,
    pub solo: bool,
    pub effects: Vec<AudioEffect>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AudioTrack {
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}

/// Partial update of a track; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioTrackPatch {
    pub name: Option<String>,
    pub track_type: Option<TrackType>,
    pub file_url: Option<String>,
    pub duration: Option<f64>,
    pub start_time: Option<f64>,
    pub volume: Option<f64>,
    pub muted: Option<bool>,
    pub solo: Option<bool>,
    pub effects: Option<Vec<AudioEffect>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterSettings {
    pub volume: f64,
    pub effects: Vec<AudioEffect>,
}

impl Default for MasterSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            effects: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioExportSettings {
    pub format: AudioExportFormat,
    pub quality: AudioExportQuality,
    pub normalization: bool,
}

impl Default for AudioExportSettings {
    fn default() -> Self {
        Self {
            format: AudioExportFormat::default(),
            quality: AudioExportQuality::default(),
            normalization: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedAudioFile {
    pub url: String,
    pub format: AudioExportFormat,
    pub quality: AudioExportQuality,
    pub duration: f64,
    pub file_size: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioProjectEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub collaborators: Vec<Collaborator>,
    pub is_public: bool,
    pub tracks: Vec<AudioTrack>,
    pub master_settings: MasterSettings,
    pub export_settings: AudioExportSettings,
    pub duration: f64,
    pub bpm: u32,
    pub key: Option<String>,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    pub exported_files: Vec<ExportedAudioFile>,
    pub status: ProjectStatus,
    pub last_opened: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AudioProjectEntity {
    pub fn new(owner_id: Uuid, title: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description: None,
            owner_id,
            collaborators: Vec::new(),
            is_public: false,
            tracks: Vec::new(),
            master_settings: MasterSettings::default(),
            export_settings: AudioExportSettings::default(),
            duration: 0.0,
            bpm: DEFAULT_BPM,
            key: None,
            tags: Vec::new(),
            cover_image: None,
            exported_files: Vec::new(),
            status: ProjectStatus::default(),
            last_opened: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Latest track end, or 0 without tracks.
    pub fn recalculate_duration(&mut self) -> f64 {
        self.duration = self
            .tracks
            .iter()
            .map(AudioTrack::end_time)
            .fold(0.0, f64::max);
        self.duration
    }

    pub fn add_track(&mut self, track: AudioTrack, now: DateTime<Utc>) -> &AudioTrack {
        self.tracks.push(track);
        self.recalculate_duration();
        self.updated_at = now;
        &self.tracks[self.tracks.len() - 1]
    }

    pub fn update_track(
        &mut self,
        track_id: Uuid,
        patch: AudioTrackPatch,
        now: DateTime<Utc>,
    ) -> Option<&AudioTrack> {
        let index = self.tracks.iter().position(|t| t.id == track_id)?;
        {
            let track = &mut self.tracks[index];
            if let Some(name) = patch.name {
                track.name = name;
            }
            if let Some(track_type) = patch.track_type {
                track.track_type = track_type;
            }
            if let Some(file_url) = patch.file_url {
                track.file_url = file_url;
            }
            if let Some(duration) = patch.duration {
                track.duration = duration;
            }
            if let Some(start_time) = patch.start_time {
                track.start_time = start_time;
            }
            if let Some(volume) = patch.volume {
                track.volume = volume;
            }
            if let Some(muted) = patch.muted {
                track.muted = muted;
            }
            if let Some(solo) = patch.solo {
                track.solo = solo;
            }
            if let Some(effects) = patch.effects {
                track.effects = effects;
            }
            track.updated_at = now;
        }
        self.recalculate_duration();
        self.updated_at = now;
        Some(&self.tracks[index])
    }

    /// Returns whether a track was removed.
    pub fn remove_track(&mut self, track_id: Uuid, now: DateTime<Utc>) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != track_id);
        let removed = self.tracks.len() != before;
        if removed {
            self.recalculate_duration();
            self.updated_at = now;
        }
        removed
    }

    pub fn export(
        &mut self,
        format: Option<AudioExportFormat>,
        quality: Option<AudioExportQuality>,
        file_size: u64,
        now: DateTime<Utc>,
    ) -> ExportedAudioFile {
        if let Some(format) = format {
            self.export_settings.format = format;
        }
        if let Some(quality) = quality {
            self.export_settings.quality = quality;
        }

        let exported = ExportedAudioFile {
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
            created_at: now,
        };

        self.exported_files.push(exported.clone());
        self.status = ProjectStatus::Completed;
        self.updated_at = now;
        exported
    }
}

impl SharedAccess for AudioProjectEntity {
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

impl Collaborative for AudioProjectEntity {
    fn collaborators_mut(&mut self) -> &mut Vec<Collaborator> {
        &mut self.collaborators
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(start_time: f64, duration: f64) -> AudioTrack {
        let now = Utc::now();
        AudioTrack {
            id: Uuid::new_v4(),
            name: "track".to_string(),
            track_type: TrackType::Vocal,
            file_url: "https://cdn.example/track.wav".to_string(),
            waveform_url: None,
            duration,
            start_time,
            volume: 1.0,
            muted: false,
            solo: false,
            effects: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn project() -> AudioProjectEntity {
        AudioProjectEntity::new(Uuid::new_v4(), "Demo".to_string(), Utc::now())
    }

    #[test]
    fn duration_is_latest_track_end() {
        let mut project = project();
        assert_eq!(project.recalculate_duration(), 0.0);

        project.add_track(track(0.0, 30.0), Utc::now());
        project.add_track(track(25.0, 10.0), Utc::now());
        project.add_track(track(5.0, 5.0), Utc::now());

        assert_eq!(project.duration, 35.0);
        assert_eq!(project.recalculate_duration(), 35.0);
        assert_eq!(project.recalculate_duration(), 35.0);
    }

    #[test]
    fn removing_last_track_resets_duration() {
        let mut project = project();
        let id = project.add_track(track(2.0, 8.0), Utc::now()).id;

        assert!(project.remove_track(id, Utc::now()));
        assert!(!project.remove_track(id, Utc::now()));
        assert_eq!(project.duration, 0.0);
    }

    #[test]
    fn update_track_merges_fields_and_recomputes() {
        let mut project = project();
        let id = project.add_track(track(0.0, 10.0), Utc::now()).id;

        let updated = project
            .update_track(
                id,
                AudioTrackPatch {
                    start_time: Some(20.0),
                    muted: Some(true),
                    ..AudioTrackPatch::default()
                },
                Utc::now(),
            )
            .unwrap();
        assert!(updated.muted);
        assert_eq!(updated.duration, 10.0);
        assert_eq!(project.duration, 30.0);

        assert!(
            project
                .update_track(Uuid::new_v4(), AudioTrackPatch::default(), Utc::now())
                .is_none()
        );
    }

    #[test]
    fn export_records_file_and_completes_project() {
        let mut project = project();
        project.add_track(track(0.0, 12.0), Utc::now());
        let now = Utc::now();

        let file = project.export(Some(AudioExportFormat::Wav), None, 1024, now);

        assert_eq!(
            file.url,
            format!(
                "https://storage.edaivi.com/exports/{}_{}.wav",
                project.id,
                now.timestamp_millis()
            )
        );
        assert_eq!(file.quality, AudioExportQuality::High);
        assert_eq!(file.duration, 12.0);
        assert_eq!(project.status, ProjectStatus::Completed);
        assert_eq!(project.exported_files.len(), 1);
    }
}
