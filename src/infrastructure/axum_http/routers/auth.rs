use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use tracing::info;

use crate::{
    application::usecases::auth::{AuthUseCase, SessionTokens},
    domain::{
        repositories::users::UserRepository,
        value_objects::auth::{
            ChangePasswordRequest, DevLoginRequest, ForgotPasswordRequest, LoginRequest,
            MessageDto, RegisterRequest, ResetPasswordRequest, UpdateProfileRequest,
        },
    },
    infrastructure::axum_http::{
        auth::{AuthUser, CurrentUser},
        error_responses::{AppError, extract_json, extract_path},
    },
};

pub fn routes<U, T>(usecase: Arc<AuthUseCase<U, T>>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    T: SessionTokens + 'static,
{
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/dev-login", post(dev_login))
        .route("/profile", get(profile).put(update_profile))
        .route("/change-password", put(change_password))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password/:token", post(reset_password))
        .route("/verify-email/:token", get(verify_email))
        .with_state(usecase)
}

pub async fn register<U, T>(
    State(usecase): State<Arc<AuthUseCase<U, T>>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    T: SessionTokens + 'static,
{
    let session = usecase.register(extract_json(body)?).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn login<U, T>(
    State(usecase): State<Arc<AuthUseCase<U, T>>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    T: SessionTokens + 'static,
{
    Ok(Json(usecase.login(extract_json(body)?).await?))
}

/// Tokens are stateless; the client just forgets its copy.
pub async fn logout(AuthUser { user_id, .. }: AuthUser) -> impl IntoResponse {
    info!(%user_id, "auth: logout");
    Json(MessageDto::new("Logged out successfully"))
}

pub async fn dev_login<U, T>(
    State(usecase): State<Arc<AuthUseCase<U, T>>>,
    body: Result<Json<DevLoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    T: SessionTokens + 'static,
{
    Ok(Json(usecase.dev_login(extract_json(body)?).await?))
}

pub async fn profile<U, T>(
    State(usecase): State<Arc<AuthUseCase<U, T>>>,
    CurrentUser(user): CurrentUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    T: SessionTokens + 'static,
{
    Json(usecase.profile(&user))
}

pub async fn update_profile<U, T>(
    State(usecase): State<Arc<AuthUseCase<U, T>>>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    T: SessionTokens + 'static,
{
    Ok(Json(usecase.update_profile(user, extract_json(body)?).await?))
}

pub async fn change_password<U, T>(
    State(usecase): State<Arc<AuthUseCase<U, T>>>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    T: SessionTokens + 'static,
{
    Ok(Json(usecase.change_password(user, extract_json(body)?).await?))
}

pub async fn forgot_password<U, T>(
    State(usecase): State<Arc<AuthUseCase<U, T>>>,
    body: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    T: SessionTokens + 'static,
{
    Ok(Json(usecase.forgot_password(extract_json(body)?).await?))
}

pub async fn reset_password<U, T>(
    State(usecase): State<Arc<AuthUseCase<U, T>>>,
    token: Result<Path<String>, PathRejection>,
    body: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    T: SessionTokens + 'static,
{
    let token = extract_path(token)?;
    Ok(Json(
        usecase.reset_password(&token, extract_json(body)?).await?,
    ))
}

pub async fn verify_email<U, T>(
    State(usecase): State<Arc<AuthUseCase<U, T>>>,
    token: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    T: SessionTokens + 'static,
{
    let token = extract_path(token)?;
    Ok(Json(usecase.verify_email(&token).await?))
}
