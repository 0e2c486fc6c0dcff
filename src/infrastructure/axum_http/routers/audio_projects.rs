use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    application::usecases::audio_projects::AudioProjectUseCase,
    domain::{
        entities::audio_projects::AudioTrackPatch,
        repositories::{audio_projects::AudioProjectRepository, users::UserRepository},
        value_objects::{
            access::AddCollaboratorRequest,
            audio_projects::{
                AddTrackRequest, AudioExportRequest, CreateAudioProjectRequest,
                UpdateAudioProjectRequest,
            },
            auth::MessageDto,
        },
    },
    infrastructure::{
        axum_http::{
            auth::CurrentUser,
            error_responses::{AppError, extract_json, extract_json_or_default, extract_path},
        },
        memory::{
            memory_database::MemoryDatabase,
            repositories::{audio_projects::AudioProjectMemory, users::UserMemory},
        },
    },
};

pub fn routes(db: Arc<MemoryDatabase>) -> Router {
    let audio_project_repository = AudioProjectMemory::new(Arc::clone(&db));
    let user_repository = UserMemory::new(Arc::clone(&db));

    let usecase =
        AudioProjectUseCase::new(Arc::new(audio_project_repository), Arc::new(user_repository));

    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
        .route("/:id/tracks", post(add_track))
        .route(
            "/:id/tracks/:track_id",
            put(update_track).delete(remove_track),
        )
        .route("/:id/export", post(export))
        .route("/:id/collaborators", post(add_collaborator))
        .route(
            "/:id/collaborators/:user_id",
            delete(remove_collaborator),
        )
        .with_state(Arc::new(usecase))
}

pub async fn list<A, U>(
    State(usecase): State<Arc<AudioProjectUseCase<A, U>>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError>
where
    A: AudioProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    Ok(Json(usecase.list(&user).await?))
}

pub async fn create<A, U>(
    State(usecase): State<Arc<AudioProjectUseCase<A, U>>>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<CreateAudioProjectRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: AudioProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let project = usecase.create(&user, extract_json(body)?).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get_one<A, U>(
    State(usecase): State<Arc<AudioProjectUseCase<A, U>>>,
    CurrentUser(user): CurrentUser,
    project_id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: AudioProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    Ok(Json(usecase.get(&user, extract_path(project_id)?).await?))
}

pub async fn update<A, U>(
    State(usecase): State<Arc<AudioProjectUseCase<A, U>>>,
    CurrentUser(user): CurrentUser,
    project_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateAudioProjectRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: AudioProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let project_id = extract_path(project_id)?;
    Ok(Json(
        usecase
            .update(&user, project_id, extract_json(body)?)
            .await?,
    ))
}

pub async fn remove<A, U>(
    State(usecase): State<Arc<AudioProjectUseCase<A, U>>>,
    CurrentUser(user): CurrentUser,
    project_id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: AudioProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    usecase.delete(&user, extract_path(project_id)?).await?;
    Ok(Json(MessageDto::new("Project deleted successfully")))
}

pub async fn add_track<A, U>(
    State(usecase): State<Arc<AudioProjectUseCase<A, U>>>,
    CurrentUser(user): CurrentUser,
    project_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<AddTrackRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: AudioProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let project_id = extract_path(project_id)?;
    let track = usecase
        .add_track(&user, project_id, extract_json(body)?)
        .await?;
    Ok((StatusCode::CREATED, Json(track)))
}

pub async fn update_track<A, U>(
    State(usecase): State<Arc<AudioProjectUseCase<A, U>>>,
    CurrentUser(user): CurrentUser,
    ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
    body: Result<Json<AudioTrackPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: AudioProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let (project_id, track_id) = extract_path(ids)?;
    Ok(Json(
        usecase
            .update_track(&user, project_id, track_id, extract_json(body)?)
            .await?,
    ))
}

pub async fn remove_track<A, U>(
    State(usecase): State<Arc<AudioProjectUseCase<A, U>>>,
    CurrentUser(user): CurrentUser,
    ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: AudioProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let (project_id, track_id) = extract_path(ids)?;
    Ok(Json(
        usecase.remove_track(&user, project_id, track_id).await?,
    ))
}

pub async fn export<A, U>(
    State(usecase): State<Arc<AudioProjectUseCase<A, U>>>,
    CurrentUser(user): CurrentUser,
    project_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<AudioExportRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: AudioProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let project_id = extract_path(project_id)?;
    Ok(Json(
        usecase
            .export(&user, project_id, extract_json_or_default(body)?)
            .await?,
    ))
}

pub async fn add_collaborator<A, U>(
    State(usecase): State<Arc<AudioProjectUseCase<A, U>>>,
    CurrentUser(user): CurrentUser,
    project_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<AddCollaboratorRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: AudioProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let project_id = extract_path(project_id)?;
    let collaborator = usecase
        .add_collaborator(&user, project_id, extract_json(body)?)
        .await?;
    Ok((StatusCode::CREATED, Json(collaborator)))
}

pub async fn remove_collaborator<A, U>(
    State(usecase): State<Arc<AudioProjectUseCase<A, U>>>,
    CurrentUser(user): CurrentUser,
    ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    A: AudioProjectRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let (project_id, collaborator_id) = extract_path(ids)?;
    Ok(Json(
        usecase
            .remove_collaborator(&user, project_id, collaborator_id)
            .await?,
    ))
}
