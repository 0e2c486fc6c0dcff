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
    application::usecases::streams::StreamSessionUseCase,
    domain::{
        repositories::stream_sessions::StreamSessionRepository,
        value_objects::{
            auth::MessageDto,
            streams::{
                ChatMessageRequest, CreateStreamRequest, StreamTransitionRequest,
                ViewerCountRequest,
            },
        },
    },
    infrastructure::{
        axum_http::{
            auth::CurrentUser,
            error_responses::{AppError, extract_json, extract_path},
        },
        memory::{
            memory_database::MemoryDatabase, repositories::stream_sessions::StreamSessionMemory,
        },
    },
};

pub fn routes(db: Arc<MemoryDatabase>) -> Router {
    let stream_repository = StreamSessionMemory::new(Arc::clone(&db));

    let usecase = StreamSessionUseCase::new(Arc::new(stream_repository));

    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).delete(remove))
        .route("/:id/status", post(transition))
        .route("/:id/chat", post(post_chat))
        .route("/:id/viewers", post(update_viewer_count))
        .with_state(Arc::new(usecase))
}

pub async fn list<S>(
    State(usecase): State<Arc<StreamSessionUseCase<S>>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError>
where
    S: StreamSessionRepository + Send + Sync + 'static,
{
    Ok(Json(usecase.list(&user).await?))
}

pub async fn create<S>(
    State(usecase): State<Arc<StreamSessionUseCase<S>>>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<CreateStreamRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    S: StreamSessionRepository + Send + Sync + 'static,
{
    let stream = usecase.create(&user, extract_json(body)?).await?;
    Ok((StatusCode::CREATED, Json(stream)))
}

pub async fn get_one<S>(
    State(usecase): State<Arc<StreamSessionUseCase<S>>>,
    CurrentUser(user): CurrentUser,
    stream_id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    S: StreamSessionRepository + Send + Sync + 'static,
{
    Ok(Json(usecase.get(&user, extract_path(stream_id)?).await?))
}

pub async fn remove<S>(
    State(usecase): State<Arc<StreamSessionUseCase<S>>>,
    CurrentUser(user): CurrentUser,
    stream_id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    S: StreamSessionRepository + Send + Sync + 'static,
{
    usecase.delete(&user, extract_path(stream_id)?).await?;
    Ok(Json(MessageDto::new("Stream deleted successfully")))
}

pub async fn transition<S>(
    State(usecase): State<Arc<StreamSessionUseCase<S>>>,
    CurrentUser(user): CurrentUser,
    stream_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<StreamTransitionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    S: StreamSessionRepository + Send + Sync + 'static,
{
    let stream_id = extract_path(stream_id)?;
    Ok(Json(
        usecase
            .transition(&user, stream_id, extract_json(body)?)
            .await?,
    ))
}

pub async fn post_chat<S>(
    State(usecase): State<Arc<StreamSessionUseCase<S>>>,
    CurrentUser(user): CurrentUser,
    stream_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ChatMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    S: StreamSessionRepository + Send + Sync + 'static,
{
    let stream_id = extract_path(stream_id)?;
    let message = usecase
        .post_chat(&user, stream_id, extract_json(body)?)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn update_viewer_count<S>(
    State(usecase): State<Arc<StreamSessionUseCase<S>>>,
    CurrentUser(user): CurrentUser,
    stream_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ViewerCountRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    S: StreamSessionRepository + Send + Sync + 'static,
{
    let stream_id = extract_path(stream_id)?;
    Ok(Json(
        usecase
            .update_viewer_count(&user, stream_id, extract_json(body)?)
            .await?,
    ))
}
