use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{
    entities::{
        scenes_3d::{Light, MeshStats, Object3D, Scene3DEntity},
        users::UserEntity,
    },
    repositories::scenes_3d::Scene3DRepository,
    value_objects::scenes::{AddLightRequest, AddObjectRequest, CloneRequest, CreateSceneRequest},
};

use super::{
    access::{ensure_edit, ensure_owner, ensure_view},
    audio_projects::DESCRIPTION_MAX_CHARS,
    errors::{UseCaseResult, not_found},
    validation::{non_negative, optional_text, required_text},
};

const NAME_MAX_CHARS: usize = 100;
const NOUN: &str = "scene";

pub struct Scene3DUseCase<S>
where
    S: Scene3DRepository + Send + Sync + 'static,
{
    scene_repository: Arc<S>,
}

impl<S> Scene3DUseCase<S>
where
    S: Scene3DRepository + Send + Sync + 'static,
{
    pub fn new(scene_repository: Arc<S>) -> Self {
        Self { scene_repository }
    }

    async fn load(&self, scene_id: Uuid) -> UseCaseResult<Scene3DEntity> {
        self.scene_repository
            .find_by_id(scene_id)
            .await
            .map_err(|err| {
                error!(%scene_id, db_error = ?err, "scenes: failed to load scene");
                err
            })?
            .ok_or_else(|| not_found("Scene not found"))
    }

    pub async fn list(&self, user: &UserEntity) -> UseCaseResult<Vec<Scene3DEntity>> {
        let scenes = self.scene_repository.list_visible_to(user.id).await?;
        Ok(scenes)
    }

    pub async fn create(
        &self,
        user: &UserEntity,
        request: CreateSceneRequest,
    ) -> UseCaseResult<Scene3DEntity> {
        let mut scene = Scene3DEntity::new(
            user.id,
            required_text("Name", &request.name, NAME_MAX_CHARS)?,
            Utc::now(),
        );
        scene.description = optional_text("Description", request.description, DESCRIPTION_MAX_CHARS)?;
        scene.category = request.category;
        scene.tags = request.tags;
        scene.is_public = request.is_public;
        scene.is_template = request.is_template;

        let scene = self.scene_repository.insert(scene).await?;
        info!(user_id = %user.id, scene_id = %scene.id, "scenes: scene created");

        Ok(scene)
    }

    pub async fn get(&self, user: &UserEntity, scene_id: Uuid) -> UseCaseResult<Scene3DEntity> {
        let scene = self.load(scene_id).await?;
        ensure_view(&scene, user.id, NOUN)?;
        Ok(scene)
    }

    pub async fn delete(&self, user: &UserEntity, scene_id: Uuid) -> UseCaseResult<()> {
        let scene = self.load(scene_id).await?;
        ensure_owner(&scene, user.id, NOUN, "delete it")?;

        self.scene_repository.delete(scene_id).await?;
        info!(user_id = %user.id, %scene_id, "scenes: scene deleted");

        Ok(())
    }

    pub async fn add_object(
        &self,
        user: &UserEntity,
        scene_id: Uuid,
        request: AddObjectRequest,
    ) -> UseCaseResult<Object3D> {
        let mut scene = self.load(scene_id).await?;
        ensure_edit(&scene, user.id, NOUN)?;

        let object = Object3D {
            id: Uuid::new_v4(),
            name: required_text("Object name", &request.name, NAME_MAX_CHARS)?,
            object_type: request.object_type,
            model_url: request.model_url,
            position: request.position,
            rotation: request.rotation,
            scale: request.scale,
            visible: request.visible,
            cast_shadow: request.cast_shadow,
            receive_shadow: request.receive_shadow,
            mesh: MeshStats {
                poly_count: request.poly_count,
                vertex_count: request.vertex_count,
            },
        };

        let object = scene.add_object(object, Utc::now()).clone();
        self.scene_repository.update(scene).await?;
        info!(user_id = %user.id, %scene_id, object_id = %object.id, "scenes: object added");

        Ok(object)
    }

    pub async fn remove_object(
        &self,
        user: &UserEntity,
        scene_id: Uuid,
        object_id: Uuid,
    ) -> UseCaseResult<Scene3DEntity> {
        let mut scene = self.load(scene_id).await?;
        ensure_edit(&scene, user.id, NOUN)?;

        scene
            .remove_object(object_id, Utc::now())
            .ok_or_else(|| not_found("Object not found in scene"))?;
        let scene = self.scene_repository.update(scene).await?;
        info!(user_id = %user.id, %scene_id, %object_id, "scenes: object removed");

        Ok(scene)
    }

    pub async fn add_light(
        &self,
        user: &UserEntity,
        scene_id: Uuid,
        request: AddLightRequest,
    ) -> UseCaseResult<Light> {
        let mut scene = self.load(scene_id).await?;
        ensure_edit(&scene, user.id, NOUN)?;

        let light = Light {
            id: Uuid::new_v4(),
            name: required_text("Light name", &request.name, NAME_MAX_CHARS)?,
            light_type: request.light_type,
            color: request.color,
            intensity: non_negative("Intensity", request.intensity)?,
            position: request.position,
            rotation: request.rotation,
            cast_shadow: request.cast_shadow,
        };

        let light = scene.add_light(light, Utc::now()).clone();
        self.scene_repository.update(scene).await?;
        info!(user_id = %user.id, %scene_id, light_id = %light.id, "scenes: light added");

        Ok(light)
    }

    /// Copies a scene the caller can see into a private scene they own.
    pub async fn clone_scene(
        &self,
        user: &UserEntity,
        scene_id: Uuid,
        request: CloneRequest,
    ) -> UseCaseResult<Scene3DEntity> {
        let source = self.load(scene_id).await?;
        ensure_view(&source, user.id, NOUN)?;

        let name = optional_text("Name", request.name, NAME_MAX_CHARS)?;
        let copy = source.clone_for(user.id, name, Utc::now());
        let copy = self.scene_repository.insert(copy).await?;
        info!(user_id = %user.id, source_id = %scene_id, scene_id = %copy.id, "scenes: scene cloned");

        Ok(copy)
    }
}
