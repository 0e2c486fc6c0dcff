use super::*;
use crate::{
    application::usecases::auth::SessionTokens,
    config::config_model::Auth,
    domain::{repositories::users::UserRepository, value_objects::auth::SessionKind},
    infrastructure::memory::memory_database::MemoryDatabase,
};
use axum::{
    Extension, Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::AUTHORIZATION},
    routing::get,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

const SECRET: &str = "supersecretjwtsecretforunittesting123";

fn auth_config() -> Auth {
    Auth {
        jwt_secret: SECRET.to_string(),
        jwt_expires_in_days: 7,
        dev_access_key: None,
        owner_email: None,
    }
}

async fn setup() -> (Router, UserMemory, JwtSessionTokens) {
    let db = Arc::new(MemoryDatabase::new());
    let usecase = SessionAuth::new(
        Arc::new(UserMemory::new(Arc::clone(&db))),
        Arc::new(JwtSessionTokens::new(SECRET, 7)),
        auth_config(),
    );

    let app = Router::new()
        .route(
            "/me",
            get(|CurrentUser(user): CurrentUser| async move { user.email }),
        )
        .layer(Extension(Arc::new(usecase)));

    (
        app,
        UserMemory::new(db),
        JwtSessionTokens::new(SECRET, 7),
    )
}

async fn call(app: Router, authorization: Option<String>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().uri("/me");
    if let Some(value) = authorization {
        request = request.header(AUTHORIZATION, value);
    }

    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_valid_token_resolves_user() {
    let (app, users, tokens) = setup().await;
    let user = users
        .insert(UserEntity::new(
            "maker@example.com",
            "hash".into(),
            "Maker".into(),
            Utc::now(),
        ))
        .await
        .unwrap();
    let token = tokens.issue(&user, SessionKind::Standard).unwrap();

    let (status, body) = call(app, Some(format!("Bearer {}", token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"maker@example.com");
}

#[tokio::test]
async fn test_missing_header_is_rejected_as_json() {
    let (app, _, _) = setup().await;

    let (status, body) = call(app, None).await;
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token provided");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let (app, users, _) = setup().await;
    let user = users
        .insert(UserEntity::new(
            "maker@example.com",
            "hash".into(),
            "Maker".into(),
            Utc::now(),
        ))
        .await
        .unwrap();
    let forged = JwtSessionTokens::new("wrongsecret", 7)
        .issue(&user, SessionKind::Standard)
        .unwrap();

    let (status, _) = call(app, Some(format!("Bearer {}", forged))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_deleted_user_is_rejected() {
    let (app, _, tokens) = setup().await;
    let ghost = UserEntity::new("ghost@example.com", "hash".into(), "Ghost".into(), Utc::now());
    let token = tokens.issue(&ghost, SessionKind::Standard).unwrap();

    let (status, body) = call(app, Some(format!("Bearer {}", token))).await;
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}
