use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    application::usecases::video_projects::VideoProjectUseCase,
    domain::{
        repositories::{users::UserRepository, video_projects::VideoProjectRepository},
        value_objects::{
            access::AddCollaboratorRequest,
            auth::MessageDto,
            video_projects::{
                AddMediaElementRequest, AddSceneRequest, CreateVideoProjectRequest,
                UpdateVideoProjectRequest, VideoExportRequest,
            },
        },
    },
    infrastructure::{
        axum_http::{
            auth::CurrentUser,
            error_responses::{AppError, extract_json, extract_json_or_default, extract_path},
        },
        memory::{
            memory_database::MemoryDatabase,
            repositories::{users::UserMemory, video_projects::VideoProjectMemory},
        },
    },
};

pub fn routes(db: Arc<MemoryDatabase>) -> Router {
    let video_project_repository = VideoProjectMemory::new(Arc::clone(&db));
    let user_repository = UserMemory::new(Arc::clone(&db));

    let usecase =
        VideoProjectUseCase::new(Arc::new(video_project_repository), Arc::new(user_repository));

    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
        .route("/:id/scenes", post(add_scene))
        .route("/:id/scenes/:scene_id", delete(remove_scene))
        .route("/:id/media", post(add_media_element))
        .route("/:id/export", post(export))
        .route("/:id/collaborators", post(add_collaborator))
        .route(
            "/:id/collaborators/:user_id",
            delete(remove_collaborator),
        )
        .with_state(Arc::new(usecase))
}

pub async fn list<V, U>(
    State(usecase): State<Arc<VideoProjectUseCase<V, U>>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError>
where
    V: VideoProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    Ok(Json(usecase.list(&user).await?))
}

pub async fn create<V, U>(
    State(usecase): State<Arc<VideoProjectUseCase<V, U>>>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<CreateVideoProjectRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    V: VideoProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let project = usecase.create(&user, extract_json(body)?).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get_one<V, U>(
    State(usecase): State<Arc<VideoProjectUseCase<V, U>>>,
    CurrentUser(user): CurrentUser,
    project_id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    V: VideoProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    Ok(Json(usecase.get(&user, extract_path(project_id)?).await?))
}

pub async fn update<V, U>(
    State(usecase): State<Arc<VideoProjectUseCase<V, U>>>,
    CurrentUser(user): CurrentUser,
    project_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateVideoProjectRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    V: VideoProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let project_id = extract_path(project_id)?;
    Ok(Json(
        usecase
            .update(&user, project_id, extract_json(body)?)
            .await?,
    ))
}

pub async fn remove<V, U>(
    State(usecase): State<Arc<VideoProjectUseCase<V, U>>>,
    CurrentUser(user): CurrentUser,
    project_id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    V: VideoProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    usecase.delete(&user, extract_path(project_id)?).await?;
    Ok(Json(MessageDto::new("Project deleted successfully")))
}

pub async fn add_scene<V, U>(
    State(usecase): State<Arc<VideoProjectUseCase<V, U>>>,
    CurrentUser(user): CurrentUser,
    project_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<AddSceneRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    V: VideoProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let project_id = extract_path(project_id)?;
    let scene = usecase
        .add_scene(&user, project_id, extract_json(body)?)
        .await?;
    Ok((StatusCode::CREATED, Json(scene)))
}

pub async fn remove_scene<V, U>(
    State(usecase): State<Arc<VideoProjectUseCase<V, U>>>,
    CurrentUser(user): CurrentUser,
    ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    V: VideoProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let (project_id, scene_id) = extract_path(ids)?;
    Ok(Json(
        usecase.remove_scene(&user, project_id, scene_id).await?,
    ))
}

pub async fn add_media_element<V, U>(
    State(usecase): State<Arc<VideoProjectUseCase<V, U>>>,
    CurrentUser(user): CurrentUser,
    project_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<AddMediaElementRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    V: VideoProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let project_id = extract_path(project_id)?;
    let element = usecase
        .add_media_element(&user, project_id, extract_json(body)?)
        .await?;
    Ok((StatusCode::CREATED, Json(element)))
}

pub async fn export<V, U>(
    State(usecase): State<Arc<VideoProjectUseCase<V, U>>>,
    CurrentUser(user): CurrentUser,
    project_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<VideoExportRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    V: VideoProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let project_id = extract_path(project_id)?;
    Ok(Json(
        usecase
            .export(&user, project_id, extract_json_or_default(body)?)
            .await?,
    ))
}

pub async fn add_collaborator<V, U>(
    State(usecase): State<Arc<VideoProjectUseCase<V, U>>>,
    CurrentUser(user): CurrentUser,
    project_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<AddCollaboratorRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    V: VideoProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let project_id = extract_path(project_id)?;
    let collaborator = usecase
        .add_collaborator(&user, project_id, extract_json(body)?)
        .await?;
    Ok((StatusCode::CREATED, Json(collaborator)))
}

pub async fn remove_collaborator<V, U>(
    State(usecase): State<Arc<VideoProjectUseCase<V, U>>>,
    CurrentUser(user): CurrentUser,
    ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    V: VideoProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let (project_id, collaborator_id) = extract_path(ids)?;
    Ok(Json(
        usecase
            .remove_collaborator(&user, project_id, collaborator_id)
            .await?,
    ))
}
