use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{
    entities::{
        audio_projects::{AudioProjectEntity, AudioTrack, AudioTrackPatch, ExportedAudioFile},
        users::UserEntity,
    },
    repositories::{audio_projects::AudioProjectRepository, users::UserRepository},
    value_objects::{
        access::{AddCollaboratorRequest, Collaborative, Collaborator},
        audio_projects::{
            AddTrackRequest, AudioExportRequest, CreateAudioProjectRequest,
            UpdateAudioProjectRequest,
        },
    },
};

use super::{
    access::{ensure_edit, ensure_export, ensure_owner, ensure_view, invite_collaborator},
    errors::{UseCaseResult, not_found},
    validation::{non_negative, optional_text, required_text, within},
};

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
const TRACK_NAME_MAX_CHARS: usize = 100;
const MAX_VOLUME: f64 = 2.0;
const MAX_EXPORT_BYTES: u64 = 10_000_000;
const NOUN: &str = "project";

pub struct AudioProjectUseCase<A, U>
where
    A: AudioProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    audio_project_repository: Arc<A>,
    user_repository: Arc<U>,
}

impl<A, U> AudioProjectUseCase<A, U>
where
    A: AudioProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(audio_project_repository: Arc<A>, user_repository: Arc<U>) -> Self {
        Self {
            audio_project_repository,
            user_repository,
        }
    }

    async fn load(&self, project_id: Uuid) -> UseCaseResult<AudioProjectEntity> {
        self.audio_project_repository
            .find_by_id(project_id)
            .await
            .map_err(|err| {
                error!(%project_id, db_error = ?err, "audio: failed to load project");
                err
            })?
            .ok_or_else(|| not_found("Audio project not found"))
    }

    async fn save(&self, project: AudioProjectEntity) -> UseCaseResult<AudioProjectEntity> {
        let project_id = project.id;
        let project = self
            .audio_project_repository
            .update(project)
            .await
            .map_err(|err| {
                error!(%project_id, db_error = ?err, "audio: failed to save project");
                err
            })?;
        Ok(project)
    }

    pub async fn list(&self, user: &UserEntity) -> UseCaseResult<Vec<AudioProjectEntity>> {
        let projects = self.audio_project_repository.list_visible_to(user.id).await?;
        Ok(projects)
    }

    pub async fn create(
        &self,
        user: &UserEntity,
        request: CreateAudioProjectRequest,
    ) -> UseCaseResult<AudioProjectEntity> {
        let title = required_text("Title", &request.title, TITLE_MAX_CHARS)?;
        let description = optional_text("Description", request.description, DESCRIPTION_MAX_CHARS)?;

        let mut project = AudioProjectEntity::new(user.id, title, Utc::now());
        project.description = description;
        if let Some(bpm) = request.bpm {
            project.bpm = bpm;
        }
        project.key = request.key;
        project.tags = request.tags;
        project.is_public = request.is_public;

        let project = self.audio_project_repository.insert(project).await?;
        info!(user_id = %user.id, project_id = %project.id, "audio: project created");

        Ok(project)
    }

    /// Also stamps `last_opened`.
    pub async fn get(&self, user: &UserEntity, project_id: Uuid) -> UseCaseResult<AudioProjectEntity> {
        let mut project = self.load(project_id).await?;
        ensure_view(&project, user.id, NOUN)?;

        project.last_opened = Utc::now();
        self.save(project).await
    }

    pub async fn update(
        &self,
        user: &UserEntity,
        project_id: Uuid,
        request: UpdateAudioProjectRequest,
    ) -> UseCaseResult<AudioProjectEntity> {
        let mut project = self.load(project_id).await?;
        ensure_owner(&project, user.id, NOUN, "update it")?;

        if let Some(title) = request.title {
            project.title = required_text("Title", &title, TITLE_MAX_CHARS)?;
        }
        if request.description.is_some() {
            project.description =
                optional_text("Description", request.description, DESCRIPTION_MAX_CHARS)?;
        }
        if let Some(bpm) = request.bpm {
            project.bpm = bpm;
        }
        if let Some(key) = request.key {
            project.key = Some(key);
        }
        if let Some(tags) = request.tags {
            project.tags = tags;
        }
        if let Some(is_public) = request.is_public {
            project.is_public = is_public;
        }
        if let Some(cover_image) = request.cover_image {
            project.cover_image = Some(cover_image);
        }
        if let Some(master_settings) = request.master_settings {
            project.master_settings = master_settings;
        }
        if let Some(export_settings) = request.export_settings {
            project.export_settings = export_settings;
        }
        project.updated_at = Utc::now();

        let project = self.save(project).await?;
        info!(user_id = %user.id, %project_id, "audio: project updated");

        Ok(project)
    }

    pub async fn delete(&self, user: &UserEntity, project_id: Uuid) -> UseCaseResult<()> {
        let project = self.load(project_id).await?;
        ensure_owner(&project, user.id, NOUN, "delete it")?;

        self.audio_project_repository.delete(project_id).await?;
        info!(user_id = %user.id, %project_id, "audio: project deleted");

        Ok(())
    }

    pub async fn add_track(
        &self,
        user: &UserEntity,
        project_id: Uuid,
        request: AddTrackRequest,
    ) -> UseCaseResult<AudioTrack> {
        let mut project = self.load(project_id).await?;
        ensure_edit(&project, user.id, NOUN)?;

        let now = Utc::now();
        let track = AudioTrack {
            id: Uuid::new_v4(),
            name: required_text("Track name", &request.name, TRACK_NAME_MAX_CHARS)?,
            track_type: request.track_type,
            file_url: required_text("File URL", &request.file_url, usize::MAX)?,
            waveform_url: request.waveform_url,
            duration: non_negative("Duration", request.duration)?,
            start_time: non_negative("Start time", request.start_time)?,
            volume: within("Volume", request.volume.unwrap_or(1.0), 0.0, MAX_VOLUME)?,
            muted: request.muted,
            solo: request.solo,
            effects: request.effects,
            created_at: now,
            updated_at: now,
        };

        let track = project.add_track(track, now).clone();
        self.save(project).await?;
        info!(user_id = %user.id, %project_id, track_id = %track.id, "audio: track added");

        Ok(track)
    }

    pub async fn update_track(
        &self,
        user: &UserEntity,
        project_id: Uuid,
        track_id: Uuid,
        patch: AudioTrackPatch,
    ) -> UseCaseResult<AudioTrack> {
        let mut project = self.load(project_id).await?;
        ensure_edit(&project, user.id, NOUN)?;

        if let Some(duration) = patch.duration {
            non_negative("Duration", duration)?;
        }
        if let Some(start_time) = patch.start_time {
            non_negative("Start time", start_time)?;
        }
        if let Some(volume) = patch.volume {
            within("Volume", volume, 0.0, MAX_VOLUME)?;
        }

        let track = project
            .update_track(track_id, patch, Utc::now())
            .cloned()
            .ok_or_else(|| not_found("Track not found in project"))?;
        self.save(project).await?;
        info!(user_id = %user.id, %project_id, %track_id, "audio: track updated");

        Ok(track)
    }

    /// Returns the project with the track gone and its duration recomputed.
    pub async fn remove_track(
        &self,
        user: &UserEntity,
        project_id: Uuid,
        track_id: Uuid,
    ) -> UseCaseResult<AudioProjectEntity> {
        let mut project = self.load(project_id).await?;
        ensure_edit(&project, user.id, NOUN)?;

        if !project.remove_track(track_id, Utc::now()) {
            return Err(not_found("Track not found in project"));
        }
        let project = self.save(project).await?;
        info!(user_id = %user.id, %project_id, %track_id, "audio: track removed");

        Ok(project)
    }

    pub async fn export(
        &self,
        user: &UserEntity,
        project_id: Uuid,
        request: AudioExportRequest,
    ) -> UseCaseResult<ExportedAudioFile> {
        let mut project = self.load(project_id).await?;
        ensure_export(&project, user.id, NOUN)?;

        let file_size = rand::thread_rng().gen_range(0..MAX_EXPORT_BYTES);
        let exported = project.export(request.format, request.quality, file_size, Utc::now());
        self.save(project).await?;
        info!(
            user_id = %user.id,
            %project_id,
            format = %exported.format,
            "audio: project exported"
        );

        Ok(exported)
    }

    pub async fn add_collaborator(
        &self,
        user: &UserEntity,
        project_id: Uuid,
        request: AddCollaboratorRequest,
    ) -> UseCaseResult<Collaborator> {
        let mut project = self.load(project_id).await?;
        ensure_owner(&project, user.id, NOUN, "add collaborators")?;

        let now = Utc::now();
        let collaborator =
            invite_collaborator(&self.user_repository, &mut project, request, now).await?;
        project.updated_at = now;
        self.save(project).await?;
        info!(
            user_id = %user.id,
            %project_id,
            collaborator_id = %collaborator.user_id,
            "audio: collaborator added"
        );

        Ok(collaborator)
    }

    /// Removing someone who is not a collaborator is a no-op.
    pub async fn remove_collaborator(
        &self,
        user: &UserEntity,
        project_id: Uuid,
        collaborator_id: Uuid,
    ) -> UseCaseResult<AudioProjectEntity> {
        let mut project = self.load(project_id).await?;
        ensure_owner(&project, user.id, NOUN, "remove collaborators")?;

        if project.remove_collaborator(collaborator_id) {
            project.updated_at = Utc::now();
            info!(user_id = %user.id, %project_id, %collaborator_id, "audio: collaborator removed");
        }

        self.save(project).await
    }
}
