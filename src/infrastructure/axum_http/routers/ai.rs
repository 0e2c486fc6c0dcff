use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    application::usecases::ai::AiUseCase,
    domain::{
        repositories::{ai_models::AiModelRepository, users::UserRepository},
        value_objects::{
            ai_models::{AiModelFilter, GenerateRequest, GenerationDto, PurchaseCreditsRequest},
            enums::ai_model_types::GenerationKind,
        },
    },
    infrastructure::{
        axum_http::{
            auth::CurrentUser,
            error_responses::{AppError, extract_json, extract_path, extract_query},
        },
        memory::{
            memory_database::MemoryDatabase,
            repositories::{ai_models::AiModelMemory, users::UserMemory},
        },
    },
};

pub fn routes(db: Arc<MemoryDatabase>) -> Router {
    let user_repository = UserMemory::new(Arc::clone(&db));
    let ai_model_repository = AiModelMemory::new(Arc::clone(&db));

    let usecase = AiUseCase::new(Arc::new(user_repository), Arc::new(ai_model_repository));

    Router::new()
        .route("/models", get(list_models))
        .route("/models/:id", get(get_model))
        .route("/generate/text", post(generate_text))
        .route("/generate/image", post(generate_image))
        .route("/generate/audio", post(generate_audio))
        .route("/credits", get(credits))
        .route("/credits/purchase", post(purchase_credits))
        .with_state(Arc::new(usecase))
}

pub async fn list_models<U, M>(
    State(usecase): State<Arc<AiUseCase<U, M>>>,
    CurrentUser(user): CurrentUser,
    filter: Result<Query<AiModelFilter>, QueryRejection>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    M: AiModelRepository + Send + Sync + 'static,
{
    Ok(Json(
        usecase.list_models(&user, extract_query(filter)?).await?,
    ))
}

pub async fn get_model<U, M>(
    State(usecase): State<Arc<AiUseCase<U, M>>>,
    CurrentUser(user): CurrentUser,
    model_id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    M: AiModelRepository + Send + Sync + 'static,
{
    Ok(Json(
        usecase.get_model(&user, extract_path(model_id)?).await?,
    ))
}

async fn generate<U, M>(
    usecase: &AiUseCase<U, M>,
    user: CurrentUser,
    kind: GenerationKind,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerationDto>, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    M: AiModelRepository + Send + Sync + 'static,
{
    let CurrentUser(user) = user;
    Ok(Json(
        usecase.generate(&user, kind, extract_json(body)?).await?,
    ))
}

pub async fn generate_text<U, M>(
    State(usecase): State<Arc<AiUseCase<U, M>>>,
    user: CurrentUser,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    M: AiModelRepository + Send + Sync + 'static,
{
    generate(&usecase, user, GenerationKind::Text, body).await
}

pub async fn generate_image<U, M>(
    State(usecase): State<Arc<AiUseCase<U, M>>>,
    user: CurrentUser,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    M: AiModelRepository + Send + Sync + 'static,
{
    generate(&usecase, user, GenerationKind::Image, body).await
}

pub async fn generate_audio<U, M>(
    State(usecase): State<Arc<AiUseCase<U, M>>>,
    user: CurrentUser,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    M: AiModelRepository + Send + Sync + 'static,
{
    generate(&usecase, user, GenerationKind::Audio, body).await
}

pub async fn credits<U, M>(
    State(usecase): State<Arc<AiUseCase<U, M>>>,
    CurrentUser(user): CurrentUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    M: AiModelRepository + Send + Sync + 'static,
{
    Json(usecase.credits(&user))
}

pub async fn purchase_credits<U, M>(
    State(usecase): State<Arc<AiUseCase<U, M>>>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<PurchaseCreditsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    M: AiModelRepository + Send + Sync + 'static,
{
    let PurchaseCreditsRequest { amount } = extract_json(body)?;
    Ok(Json(usecase.purchase_credits(&user, amount).await?))
}
