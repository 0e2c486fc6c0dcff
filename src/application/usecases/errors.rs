use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::entities::stream_sessions::StreamSessionError;

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UseCaseError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UseCaseError::NotFound(_) => StatusCode::NOT_FOUND,
            UseCaseError::Forbidden(_) => StatusCode::FORBIDDEN,
            UseCaseError::BadRequest(_) | UseCaseError::Conflict(_) => StatusCode::BAD_REQUEST,
            UseCaseError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            UseCaseError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used as the `error` field of the JSON body.
    pub fn label(&self) -> &'static str {
        match self {
            UseCaseError::NotFound(_) => "Not found",
            UseCaseError::Forbidden(_) => "Forbidden",
            UseCaseError::BadRequest(_) => "Bad request",
            UseCaseError::Unauthorized(_) => "Unauthorized",
            UseCaseError::Conflict(_) => "Conflict",
            UseCaseError::Internal(_) => "Internal server error",
        }
    }
}

impl From<StreamSessionError> for UseCaseError {
    fn from(err: StreamSessionError) -> Self {
        UseCaseError::BadRequest(err.to_string())
    }
}

pub type UseCaseResult<T> = std::result::Result<T, UseCaseError>;

pub fn not_found(message: impl Into<String>) -> UseCaseError {
    UseCaseError::NotFound(message.into())
}

pub fn forbidden(message: impl Into<String>) -> UseCaseError {
    UseCaseError::Forbidden(message.into())
}

pub fn bad_request(message: impl Into<String>) -> UseCaseError {
    UseCaseError::BadRequest(message.into())
}
