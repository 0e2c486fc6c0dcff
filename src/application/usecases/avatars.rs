use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{
    entities::{
        avatars_3d::{Avatar3DEntity, AvatarAnimation, AvatarTexture},
        users::UserEntity,
    },
    repositories::avatars_3d::Avatar3DRepository,
    value_objects::{
        avatars::{AddAnimationRequest, AddTextureRequest, CreateAvatarRequest},
        scenes::CloneRequest,
    },
};

use super::{
    access::{ensure_edit, ensure_owner, ensure_view},
    audio_projects::DESCRIPTION_MAX_CHARS,
    errors::{UseCaseResult, not_found},
    validation::{non_negative, optional_text, required_text},
};

const NAME_MAX_CHARS: usize = 100;
const NOUN: &str = "avatar";

pub struct Avatar3DUseCase<A>
where
    A: Avatar3DRepository + Send + Sync + 'static,
{
    avatar_repository: Arc<A>,
}

impl<A> Avatar3DUseCase<A>
where
    A: Avatar3DRepository + Send + Sync + 'static,
{
    pub fn new(avatar_repository: Arc<A>) -> Self {
        Self { avatar_repository }
    }

    async fn load(&self, avatar_id: Uuid) -> UseCaseResult<Avatar3DEntity> {
        self.avatar_repository
            .find_by_id(avatar_id)
            .await
            .map_err(|err| {
                error!(%avatar_id, db_error = ?err, "avatars: failed to load avatar");
                err
            })?
            .ok_or_else(|| not_found("Avatar not found"))
    }

    pub async fn list(&self, user: &UserEntity) -> UseCaseResult<Vec<Avatar3DEntity>> {
        let avatars = self.avatar_repository.list_visible_to(user.id).await?;
        Ok(avatars)
    }

    pub async fn create(
        &self,
        user: &UserEntity,
        request: CreateAvatarRequest,
    ) -> UseCaseResult<Avatar3DEntity> {
        let mut avatar = Avatar3DEntity::new(
            user.id,
            required_text("Name", &request.name, NAME_MAX_CHARS)?,
            required_text("Model URL", &request.model_url, usize::MAX)?,
            Utc::now(),
        );
        avatar.description =
            optional_text("Description", request.description, DESCRIPTION_MAX_CHARS)?;
        avatar.category = request.category;
        avatar.format = request.format;
        avatar.thumbnail_url = request.thumbnail_url;
        avatar.tags = request.tags;
        avatar.is_public = request.is_public;
        avatar.is_template = request.is_template;

        let avatar = self.avatar_repository.insert(avatar).await?;
        info!(user_id = %user.id, avatar_id = %avatar.id, "avatars: avatar created");

        Ok(avatar)
    }

    pub async fn get(&self, user: &UserEntity, avatar_id: Uuid) -> UseCaseResult<Avatar3DEntity> {
        let avatar = self.load(avatar_id).await?;
        ensure_view(&avatar, user.id, NOUN)?;
        Ok(avatar)
    }

    pub async fn delete(&self, user: &UserEntity, avatar_id: Uuid) -> UseCaseResult<()> {
        let avatar = self.load(avatar_id).await?;
        ensure_owner(&avatar, user.id, NOUN, "delete it")?;

        self.avatar_repository.delete(avatar_id).await?;
        info!(user_id = %user.id, %avatar_id, "avatars: avatar deleted");

        Ok(())
    }

    pub async fn add_animation(
        &self,
        user: &UserEntity,
        avatar_id: Uuid,
        request: AddAnimationRequest,
    ) -> UseCaseResult<AvatarAnimation> {
        let mut avatar = self.load(avatar_id).await?;
        ensure_edit(&avatar, user.id, NOUN)?;

        let animation = AvatarAnimation {
            id: Uuid::new_v4(),
            name: required_text("Animation name", &request.name, NAME_MAX_CHARS)?,
            category: request.category,
            file_url: required_text("File URL", &request.file_url, usize::MAX)?,
            thumbnail_url: request.thumbnail_url,
            duration: non_negative("Duration", request.duration)?,
            loopable: request.loopable,
            tags: request.tags,
        };

        let animation = avatar.add_animation(animation, Utc::now()).clone();
        self.avatar_repository.update(avatar).await?;
        info!(user_id = %user.id, %avatar_id, animation_id = %animation.id, "avatars: animation added");

        Ok(animation)
    }

    pub async fn add_texture(
        &self,
        user: &UserEntity,
        avatar_id: Uuid,
        request: AddTextureRequest,
    ) -> UseCaseResult<AvatarTexture> {
        let mut avatar = self.load(avatar_id).await?;
        ensure_edit(&avatar, user.id, NOUN)?;

        let texture = AvatarTexture {
            id: Uuid::new_v4(),
            name: required_text("Texture name", &request.name, NAME_MAX_CHARS)?,
            texture_type: request.texture_type,
            file_url: required_text("File URL", &request.file_url, usize::MAX)?,
            thumbnail_url: request.thumbnail_url,
            resolution: request.resolution,
        };

        let texture = avatar.add_texture(texture, Utc::now()).clone();
        self.avatar_repository.update(avatar).await?;
        info!(user_id = %user.id, %avatar_id, texture_id = %texture.id, "avatars: texture added");

        Ok(texture)
    }

    pub async fn clone_avatar(
        &self,
        user: &UserEntity,
        avatar_id: Uuid,
        request: CloneRequest,
    ) -> UseCaseResult<Avatar3DEntity> {
        let source = self.load(avatar_id).await?;
        ensure_view(&source, user.id, NOUN)?;

        let name = optional_text("Name", request.name, NAME_MAX_CHARS)?;
        let copy = self
            .avatar_repository
            .insert(source.clone_for(user.id, name, Utc::now()))
            .await?;
        info!(user_id = %user.id, source_id = %avatar_id, avatar_id = %copy.id, "avatars: avatar cloned");

        Ok(copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::usecases::errors::UseCaseError,
        domain::{
            entities::avatars_3d::TextureResolution,
            repositories::avatars_3d::MockAvatar3DRepository,
            value_objects::enums::three_d::TextureType,
        },
    };
    use mockall::predicate::eq;

    fn user(email: &str) -> UserEntity {
        UserEntity::new(email, "hash".into(), "Someone".into(), Utc::now())
    }

    fn avatar(owner_id: Uuid) -> Avatar3DEntity {
        Avatar3DEntity::new(
            owner_id,
            "Robo".into(),
            "https://cdn.example/robo.glb".into(),
            Utc::now(),
        )
    }

    fn repository_with(avatar: Avatar3DEntity) -> MockAvatar3DRepository {
        let mut repository = MockAvatar3DRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(avatar.id))
            .returning(move |_| {
                let avatar = avatar.clone();
                Box::pin(async move { Ok(Some(avatar)) })
            });
        repository
    }

    #[tokio::test]
    async fn create_requires_model_url() {
        let usecase = Avatar3DUseCase::new(Arc::new(MockAvatar3DRepository::new()));

        let err = usecase
            .create(
                &user("owner@example.com"),
                CreateAvatarRequest {
                    name: "Robo".into(),
                    model_url: " ".into(),
                    ..CreateAvatarRequest::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Model URL is required");
    }

    #[tokio::test]
    async fn public_avatar_is_read_only_for_others() {
        let owner = user("owner@example.com");
        let mut public = avatar(owner.id);
        public.is_public = true;
        let avatar_id = public.id;
        let usecase = Avatar3DUseCase::new(Arc::new(repository_with(public)));
        let visitor = user("visitor@example.com");

        assert!(usecase.get(&visitor, avatar_id).await.is_ok());
        let err = usecase
            .add_texture(
                &visitor,
                avatar_id,
                AddTextureRequest {
                    name: "skin".into(),
                    texture_type: TextureType::Diffuse,
                    file_url: "https://cdn.example/skin.png".into(),
                    thumbnail_url: None,
                    resolution: TextureResolution::default(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UseCaseError::Forbidden(_)));
    }

    #[tokio::test]
    async fn clone_uses_requested_name() {
        let owner = user("owner@example.com");
        let source = avatar(owner.id);
        let avatar_id = source.id;
        let mut repository = repository_with(source);
        repository
            .expect_insert()
            .returning(|copy| Box::pin(async move { Ok(copy) }));
        let usecase = Avatar3DUseCase::new(Arc::new(repository));

        let copy = usecase
            .clone_avatar(
                &owner,
                avatar_id,
                CloneRequest {
                    name: Some("Robo v2".into()),
                },
            )
            .await
            .unwrap();

        assert_eq!(copy.name, "Robo v2");
        assert_eq!(copy.owner_id, owner.id);
    }
}
