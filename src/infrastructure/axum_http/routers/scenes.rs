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
    application::usecases::scenes::Scene3DUseCase,
    domain::{
        repositories::scenes_3d::Scene3DRepository,
        value_objects::{
            auth::MessageDto,
            scenes::{AddLightRequest, AddObjectRequest, CloneRequest, CreateSceneRequest},
        },
    },
    infrastructure::{
        axum_http::{
            auth::CurrentUser,
            error_responses::{AppError, extract_json, extract_json_or_default, extract_path},
        },
        memory::{memory_database::MemoryDatabase, repositories::scenes_3d::Scene3DMemory},
    },
};

pub fn routes(db: Arc<MemoryDatabase>) -> Router {
    let scene_repository = Scene3DMemory::new(Arc::clone(&db));

    let usecase = Scene3DUseCase::new(Arc::new(scene_repository));

    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).delete(remove))
        .route("/:id/objects", post(add_object))
        .route("/:id/objects/:object_id", delete(remove_object))
        .route("/:id/lights", post(add_light))
        .route("/:id/clone", post(clone_scene))
        .with_state(Arc::new(usecase))
}

pub async fn list<S>(
    State(usecase): State<Arc<Scene3DUseCase<S>>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError>
where
    S: Scene3DRepository + Send + Sync + 'static,
{
    Ok(Json(usecase.list(&user).await?))
}

pub async fn create<S>(
    State(usecase): State<Arc<Scene3DUseCase<S>>>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<CreateSceneRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    S: Scene3DRepository + Send + Sync + 'static,
{
    let scene = usecase.create(&user, extract_json(body)?).await?;
    Ok((StatusCode::CREATED, Json(scene)))
}

pub async fn get_one<S>(
    State(usecase): State<Arc<Scene3DUseCase<S>>>,
    CurrentUser(user): CurrentUser,
    scene_id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    S: Scene3DRepository + Send + Sync + 'static,
{
    Ok(Json(usecase.get(&user, extract_path(scene_id)?).await?))
}

pub async fn remove<S>(
    State(usecase): State<Arc<Scene3DUseCase<S>>>,
    CurrentUser(user): CurrentUser,
    scene_id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    S: Scene3DRepository + Send + Sync + 'static,
{
    usecase.delete(&user, extract_path(scene_id)?).await?;
    Ok(Json(MessageDto::new("Scene deleted successfully")))
}

pub async fn add_object<S>(
    State(usecase): State<Arc<Scene3DUseCase<S>>>,
    CurrentUser(user): CurrentUser,
    scene_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<AddObjectRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    S: Scene3DRepository + Send + Sync + 'static,
{
    let scene_id = extract_path(scene_id)?;
    let object = usecase
        .add_object(&user, scene_id, extract_json(body)?)
        .await?;
    Ok((StatusCode::CREATED, Json(object)))
}

pub async fn remove_object<S>(
    State(usecase): State<Arc<Scene3DUseCase<S>>>,
    CurrentUser(user): CurrentUser,
    ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    S: Scene3DRepository + Send + Sync + 'static,
{
    let (scene_id, object_id) = extract_path(ids)?;
    Ok(Json(
        usecase.remove_object(&user, scene_id, object_id).await?,
    ))
}

pub async fn add_light<S>(
    State(usecase): State<Arc<Scene3DUseCase<S>>>,
    CurrentUser(user): CurrentUser,
    scene_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<AddLightRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    S: Scene3DRepository + Send + Sync + 'static,
{
    let scene_id = extract_path(scene_id)?;
    let light = usecase
        .add_light(&user, scene_id, extract_json(body)?)
        .await?;
    Ok((StatusCode::CREATED, Json(light)))
}

pub async fn clone_scene<S>(
    State(usecase): State<Arc<Scene3DUseCase<S>>>,
    CurrentUser(user): CurrentUser,
    scene_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<CloneRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    S: Scene3DRepository + Send + Sync + 'static,
{
    let scene_id = extract_path(scene_id)?;
    let clone = usecase
        .clone_scene(&user, scene_id, extract_json_or_default(body)?)
        .await?;
    Ok((StatusCode::CREATED, Json(clone)))
}
