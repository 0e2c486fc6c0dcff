use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::error;
use uuid::Uuid;

use crate::{
    application::usecases::{auth::AuthUseCase, errors::UseCaseError},
    domain::{entities::users::UserEntity, value_objects::auth::SessionClaims},
    infrastructure::{
        axum_http::error_responses::AppError, memory::repositories::users::UserMemory,
        security::jwt::JwtSessionTokens,
    },
};

/// Installed once as a request extension; every extractor below reads it.
pub type SessionAuth = AuthUseCase<UserMemory, JwtSessionTokens>;

/// A request carrying a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub is_developer: bool,
    pub claims: SessionClaims,
}

/// The stored account behind the bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserEntity);

fn session_auth(parts: &Parts) -> Result<Arc<SessionAuth>, AppError> {
    parts.extensions.get::<Arc<SessionAuth>>().cloned().ok_or_else(|| {
        error!("auth: session authenticator extension is missing");
        AppError::UseCase(UseCaseError::Internal(anyhow::anyhow!(
            "Authentication is not configured"
        )))
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = session_auth(parts)?;

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized("No token provided".to_string()))?;

        let claims = auth.verify_token(bearer.token())?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user id in token".to_string()))?;

        Ok(AuthUser {
            user_id,
            is_developer: claims.is_developer,
            claims,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser { claims, .. } = AuthUser::from_request_parts(parts, state).await?;
        let user = session_auth(parts)?.authenticate(&claims).await?;

        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests;
