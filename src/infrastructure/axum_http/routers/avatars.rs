use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    application::usecases::avatars::Avatar3DUseCase,
    domain::{
        repositories::avatars_3d::Avatar3DRepository,
        value_objects::{
            auth::MessageDto,
            avatars::{AddAnimationRequest, AddTextureRequest, CreateAvatarRequest},
            scenes::CloneRequest,
        },
    },
    infrastructure::{
        axum_http::{
            auth::CurrentUser,
            error_responses::{AppError, extract_json, extract_json_or_default, extract_path},
        },
        memory::{memory_database::MemoryDatabase, repositories::avatars_3d::Avatar3DMemory},
    },
};

pub fn routes(db: Arc<MemoryDatabase>) -> Router {
    let avatar_repository = Avatar3DMemory::new(Arc::clone(&db));

    let usecase = Avatar3DUseCase::new(Arc::new(avatar_repository));

    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).delete(remove))
        .route("/:id/animations", post(add_animation))
        .route("/:id/textures", post(add_texture))
        .route("/:id/clone", post(clone_avatar))
        .with_state(Arc::new(usecase))
}

pub async fn list<A>(
    State(usecase): State<Arc<Avatar3DUseCase<A>>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError>
where
    A: Avatar3DRepository + Send + Sync + 'static,
{
    Ok(Json(usecase.list(&user).await?))
}

pub async fn create<A>(
    State(usecase): State<Arc<Avatar3DUseCase<A>>>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<CreateAvatarRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: Avatar3DRepository + Send + Sync + 'static,
{
    let avatar = usecase.create(&user, extract_json(body)?).await?;
    Ok((StatusCode::CREATED, Json(avatar)))
}

pub async fn get_one<A>(
    State(usecase): State<Arc<Avatar3DUseCase<A>>>,
    CurrentUser(user): CurrentUser,
    avatar_id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: Avatar3DRepository + Send + Sync + 'static,
{
    Ok(Json(usecase.get(&user, extract_path(avatar_id)?).await?))
}

pub async fn remove<A>(
    State(usecase): State<Arc<Avatar3DUseCase<A>>>,
    CurrentUser(user): CurrentUser,
    avatar_id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: Avatar3DRepository + Send + Sync + 'static,
{
    usecase.delete(&user, extract_path(avatar_id)?).await?;
    Ok(Json(MessageDto::new("Avatar deleted successfully")))
}

pub async fn add_animation<A>(
    State(usecase): State<Arc<Avatar3DUseCase<A>>>,
    CurrentUser(user): CurrentUser,
    avatar_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<AddAnimationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: Avatar3DRepository + Send + Sync + 'static,
{
    let avatar_id = extract_path(avatar_id)?;
    let animation = usecase
        .add_animation(&user, avatar_id, extract_json(body)?)
        .await?;
    Ok((StatusCode::CREATED, Json(animation)))
}

pub async fn add_texture<A>(
    State(usecase): State<Arc<Avatar3DUseCase<A>>>,
    CurrentUser(user): CurrentUser,
    avatar_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<AddTextureRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: Avatar3DRepository + Send + Sync + 'static,
{
    let avatar_id = extract_path(avatar_id)?;
    let texture = usecase
        .add_texture(&user, avatar_id, extract_json(body)?)
        .await?;
    Ok((StatusCode::CREATED, Json(texture)))
}

pub async fn clone_avatar<A>(
    State(usecase): State<Arc<Avatar3DUseCase<A>>>,
    CurrentUser(user): CurrentUser,
    avatar_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<CloneRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: Avatar3DRepository + Send + Sync + 'static,
{
    let avatar_id = extract_path(avatar_id)?;
    let clone = usecase
        .clone_avatar(&user, avatar_id, extract_json_or_default(body)?)
        .await?;
    Ok((StatusCode::CREATED, Json(clone)))
}
