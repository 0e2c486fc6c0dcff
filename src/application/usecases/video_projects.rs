use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::{
        users::UserEntity,
        video_projects::{ExportedVideoFile, MediaElement, VideoProjectEntity, VideoScene},
    },
    repositories::{users::UserRepository, video_projects::VideoProjectRepository},
    value_objects::{
        access::{AddCollaboratorRequest, Collaborative, Collaborator},
        video_projects::{
            AddMediaElementRequest, AddSceneRequest, CreateVideoProjectRequest,
            UpdateVideoProjectRequest, VideoExportRequest,
        },
    },
};

use super::{
    access::{ensure_edit, ensure_export, ensure_owner, ensure_view, invite_collaborator},
    audio_projects::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS},
    errors::{UseCaseResult, bad_request, not_found},
    validation::{non_negative, optional_text, required_text, within},
};

const NAME_MAX_CHARS: usize = 100;
const MAX_FRAME_RATE: u32 = 120;
const MAX_VOLUME: f64 = 2.0;
const MAX_EXPORT_BYTES: u64 = 100_000_000;
const NOUN: &str = "project";

fn validate_frame_rate(frame_rate: u32) -> UseCaseResult<u32> {
    if frame_rate == 0 || frame_rate > MAX_FRAME_RATE {
        return Err(bad_request(format!(
            "Frame rate must be between 1 and {}",
            MAX_FRAME_RATE
        )));
    }
    Ok(frame_rate)
}

pub struct VideoProjectUseCase<V, U>
where
    V: VideoProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    video_project_repository: Arc<V>,
    user_repository: Arc<U>,
}

impl<V, U> VideoProjectUseCase<V, U>
where
    V: VideoProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(video_project_repository: Arc<V>, user_repository: Arc<U>) -> Self {
        Self {
            video_project_repository,
            user_repository,
        }
    }

    async fn load(&self, project_id: Uuid) -> UseCaseResult<VideoProjectEntity> {
        self.video_project_repository
            .find_by_id(project_id)
            .await
            .map_err(|err| {
                error!(%project_id, db_error = ?err, "video: failed to load project");
                err
            })?
            .ok_or_else(|| not_found("Video project not found"))
    }

    async fn save(&self, project: VideoProjectEntity) -> UseCaseResult<VideoProjectEntity> {
        let project_id = project.id;
        let project = self
            .video_project_repository
            .update(project)
            .await
            .map_err(|err| {
                error!(%project_id, db_error = ?err, "video: failed to save project");
                err
            })?;
        Ok(project)
    }

    pub async fn list(&self, user: &UserEntity) -> UseCaseResult<Vec<VideoProjectEntity>> {
        let projects = self.video_project_repository.list_visible_to(user.id).await?;
        Ok(projects)
    }

    pub async fn create(
        &self,
        user: &UserEntity,
        request: CreateVideoProjectRequest,
    ) -> UseCaseResult<VideoProjectEntity> {
        let title = required_text("Title", &request.title, TITLE_MAX_CHARS)?;
        let description = optional_text("Description", request.description, DESCRIPTION_MAX_CHARS)?;

        let mut project = VideoProjectEntity::new(user.id, title, Utc::now());
        project.description = description;
        if let Some(quality) = request.quality {
            project.resolution = quality.into();
            project.export_settings.quality = quality;
        }
        if let Some(frame_rate) = request.frame_rate {
            project.frame_rate = validate_frame_rate(frame_rate)?;
        }
        project.tags = request.tags;
        project.is_public = request.is_public;

        let project = self.video_project_repository.insert(project).await?;
        info!(user_id = %user.id, project_id = %project.id, "video: project created");

        Ok(project)
    }

    pub async fn get(&self, user: &UserEntity, project_id: Uuid) -> UseCaseResult<VideoProjectEntity> {
        let mut project = self.load(project_id).await?;
        ensure_view(&project, user.id, NOUN)?;

        project.last_opened = Utc::now();
        self.save(project).await
    }

    pub async fn update(
        &self,
        user: &UserEntity,
        project_id: Uuid,
        request: UpdateVideoProjectRequest,
    ) -> UseCaseResult<VideoProjectEntity> {
        let mut project = self.load(project_id).await?;
        ensure_owner(&project, user.id, NOUN, "update it")?;

        if let Some(title) = request.title {
            project.title = required_text("Title", &title, TITLE_MAX_CHARS)?;
        }
        if request.description.is_some() {
            project.description =
                optional_text("Description", request.description, DESCRIPTION_MAX_CHARS)?;
        }
        if let Some(frame_rate) = request.frame_rate {
            project.frame_rate = validate_frame_rate(frame_rate)?;
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
        if let Some(export_settings) = request.export_settings {
            project.export_settings = export_settings;
        }
        project.updated_at = Utc::now();

        let project = self.save(project).await?;
        info!(user_id = %user.id, %project_id, "video: project updated");

        Ok(project)
    }

    pub async fn delete(&self, user: &UserEntity, project_id: Uuid) -> UseCaseResult<()> {
        let project = self.load(project_id).await?;
        ensure_owner(&project, user.id, NOUN, "delete it")?;

        self.video_project_repository.delete(project_id).await?;
        info!(user_id = %user.id, %project_id, "video: project deleted");

        Ok(())
    }

    pub async fn add_scene(
        &self,
        user: &UserEntity,
        project_id: Uuid,
        request: AddSceneRequest,
    ) -> UseCaseResult<VideoScene> {
        let mut project = self.load(project_id).await?;
        ensure_edit(&project, user.id, NOUN)?;

        let scene = VideoScene {
            id: Uuid::new_v4(),
            name: required_text("Scene name", &request.name, NAME_MAX_CHARS)?,
            description: optional_text("Description", request.description, DESCRIPTION_MAX_CHARS)?,
            start_time: non_negative("Start time", request.start_time)?,
            duration: non_negative("Duration", request.duration)?,
            background: request.background,
            transition: request.transition,
        };

        let scene = project.add_scene(scene, Utc::now()).clone();
        self.save(project).await?;
        info!(user_id = %user.id, %project_id, scene_id = %scene.id, "video: scene added");

        Ok(scene)
    }

    /// Drops the scene together with its media elements.
    pub async fn remove_scene(
        &self,
        user: &UserEntity,
        project_id: Uuid,
        scene_id: Uuid,
    ) -> UseCaseResult<VideoProjectEntity> {
        let mut project = self.load(project_id).await?;
        ensure_edit(&project, user.id, NOUN)?;

        if !project.remove_scene(scene_id, Utc::now()) {
            return Err(not_found("Scene not found in project"));
        }
        let project = self.save(project).await?;
        info!(user_id = %user.id, %project_id, %scene_id, "video: scene removed");

        Ok(project)
    }

    pub async fn add_media_element(
        &self,
        user: &UserEntity,
        project_id: Uuid,
        request: AddMediaElementRequest,
    ) -> UseCaseResult<MediaElement> {
        let mut project = self.load(project_id).await?;
        ensure_edit(&project, user.id, NOUN)?;

        let element = MediaElement {
            id: Uuid::new_v4(),
            media_type: request.media_type,
            name: required_text("Media name", &request.name, NAME_MAX_CHARS)?,
            file_url: request.file_url,
            thumbnail_url: request.thumbnail_url,
            start_time: non_negative("Start time", request.start_time)?,
            duration: non_negative("Duration", request.duration)?,
            opacity: within("Opacity", request.opacity.unwrap_or(1.0), 0.0, 1.0)?,
            volume: within("Volume", request.volume.unwrap_or(1.0), 0.0, MAX_VOLUME)?,
            muted: request.muted,
            scene_id: request.scene_id,
        };

        let Some(element) = project.add_media_element(element, Utc::now()).cloned() else {
            warn!(user_id = %user.id, %project_id, scene_id = ?request.scene_id, "video: media for unknown scene");
            return Err(not_found("Scene not found in project"));
        };
        self.save(project).await?;
        info!(user_id = %user.id, %project_id, element_id = %element.id, "video: media element added");

        Ok(element)
    }

    pub async fn export(
        &self,
        user: &UserEntity,
        project_id: Uuid,
        request: VideoExportRequest,
    ) -> UseCaseResult<ExportedVideoFile> {
        let mut project = self.load(project_id).await?;
        ensure_export(&project, user.id, NOUN)?;

        let file_size = rand::thread_rng().gen_range(0..MAX_EXPORT_BYTES);
        let exported = project.export(request.format, request.quality, file_size, Utc::now());
        self.save(project).await?;
        info!(
            user_id = %user.id,
            %project_id,
            format = %exported.format,
            "video: project exported"
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
            "video: collaborator added"
        );

        Ok(collaborator)
    }

    pub async fn remove_collaborator(
        &self,
        user: &UserEntity,
        project_id: Uuid,
        collaborator_id: Uuid,
    ) -> UseCaseResult<VideoProjectEntity> {
        let mut project = self.load(project_id).await?;
        ensure_owner(&project, user.id, NOUN, "remove collaborators")?;

        if project.remove_collaborator(collaborator_id) {
            project.updated_at = Utc::now();
            info!(user_id = %user.id, %project_id, %collaborator_id, "video: collaborator removed");
        }

        self.save(project).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::usecases::errors::UseCaseError,
        domain::{
            entities::video_projects::{SceneBackground, SceneTransition},
            repositories::{users::MockUserRepository, video_projects::MockVideoProjectRepository},
            value_objects::enums::{
                collaborator_roles::CollaboratorRole,
                video_formats::{MediaElementType, VideoQuality},
            },
        },
    };
    use mockall::predicate::eq;

    fn user(email: &str) -> UserEntity {
        UserEntity::new(email, "hash".into(), "Someone".into(), Utc::now())
    }

    fn repository_with(project: VideoProjectEntity) -> MockVideoProjectRepository {
        let mut repository = MockVideoProjectRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(project.id))
            .returning(move |_| {
                let project = project.clone();
                Box::pin(async move { Ok(Some(project)) })
            });
        repository
    }

    fn scene(start_time: f64, duration: f64) -> VideoScene {
        VideoScene {
            id: Uuid::new_v4(),
            name: "Intro".into(),
            description: None,
            start_time,
            duration,
            background: SceneBackground::default(),
            transition: SceneTransition::default(),
        }
    }

    fn media(scene_id: Option<Uuid>) -> AddMediaElementRequest {
        AddMediaElementRequest {
            media_type: MediaElementType::Image,
            name: "Logo".into(),
            file_url: None,
            thumbnail_url: None,
            start_time: 0.0,
            duration: 2.0,
            opacity: None,
            volume: None,
            muted: false,
            scene_id,
        }
    }

    #[tokio::test]
    async fn create_applies_quality_to_resolution() {
        let mut repository = MockVideoProjectRepository::new();
        repository
            .expect_insert()
            .returning(|project| Box::pin(async move { Ok(project) }));
        let usecase =
            VideoProjectUseCase::new(Arc::new(repository), Arc::new(MockUserRepository::new()));

        let created = usecase
            .create(
                &user("owner@example.com"),
                CreateVideoProjectRequest {
                    title: "Trailer".into(),
                    quality: Some(VideoQuality::Hd720),
                    ..CreateVideoProjectRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!((created.resolution.width, created.resolution.height), (1280, 720));
        assert_eq!(created.frame_rate, 30);
    }

    #[tokio::test]
    async fn removing_scene_cascades_to_its_media() {
        let owner = user("owner@example.com");
        let mut project = VideoProjectEntity::new(owner.id, "Trailer".into(), Utc::now());
        let intro = project.add_scene(scene(0.0, 5.0), Utc::now()).id;
        let outro = project.add_scene(scene(5.0, 5.0), Utc::now()).id;
        let project_id = project.id;
        for scene_id in [Some(intro), Some(outro), None] {
            project
                .add_media_element(
                    MediaElement {
                        id: Uuid::new_v4(),
                        media_type: MediaElementType::Text,
                        name: "caption".into(),
                        file_url: None,
                        thumbnail_url: None,
                        start_time: 0.0,
                        duration: 1.0,
                        opacity: 1.0,
                        volume: 1.0,
                        muted: false,
                        scene_id,
                    },
                    Utc::now(),
                )
                .unwrap();
        }

        let mut repository = repository_with(project);
        repository
            .expect_update()
            .returning(|project| Box::pin(async move { Ok(project) }));
        let usecase =
            VideoProjectUseCase::new(Arc::new(repository), Arc::new(MockUserRepository::new()));

        let updated = usecase.remove_scene(&owner, project_id, intro).await.unwrap();

        assert_eq!(updated.scenes.len(), 1);
        assert_eq!(updated.media_elements.len(), 2);
        assert!(updated.media_elements.iter().all(|m| m.scene_id != Some(intro)));
        assert_eq!(updated.duration, 10.0);
    }

    #[tokio::test]
    async fn media_for_unknown_scene_is_not_found() {
        let owner = user("owner@example.com");
        let project = VideoProjectEntity::new(owner.id, "Trailer".into(), Utc::now());
        let project_id = project.id;
        let usecase = VideoProjectUseCase::new(
            Arc::new(repository_with(project)),
            Arc::new(MockUserRepository::new()),
        );

        let err = usecase
            .add_media_element(&owner, project_id, media(Some(Uuid::new_v4())))
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn viewer_cannot_add_scene() {
        let owner = user("owner@example.com");
        let viewer = user("viewer@example.com");
        let mut project = VideoProjectEntity::new(owner.id, "Trailer".into(), Utc::now());
        project
            .add_collaborator(viewer.id, CollaboratorRole::Viewer, Utc::now())
            .unwrap();
        let project_id = project.id;
        let usecase = VideoProjectUseCase::new(
            Arc::new(repository_with(project)),
            Arc::new(MockUserRepository::new()),
        );

        let err = usecase
            .add_scene(
                &viewer,
                project_id,
                AddSceneRequest {
                    name: "Intro".into(),
                    description: None,
                    start_time: 0.0,
                    duration: 3.0,
                    background: SceneBackground::default(),
                    transition: SceneTransition::default(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::Forbidden(_)));
    }

    #[tokio::test]
    async fn frame_rate_is_bounded() {
        let owner = user("owner@example.com");
        let project = VideoProjectEntity::new(owner.id, "Trailer".into(), Utc::now());
        let project_id = project.id;
        let usecase = VideoProjectUseCase::new(
            Arc::new(repository_with(project)),
            Arc::new(MockUserRepository::new()),
        );

        let err = usecase
            .update(
                &owner,
                project_id,
                UpdateVideoProjectRequest {
                    frame_rate: Some(0),
                    ..UpdateVideoProjectRequest::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::BadRequest(_)));
    }
}
