use std::{sync::Arc, time::Instant};

use axum::{
    Json, Router,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::config::stage::Stage;

const API_VERSION: &str = "1.0.0";

const AVAILABLE_ROUTES: [&str; 13] = [
    "GET /",
    "GET /api",
    "GET /api/status",
    "POST /api/auth/register",
    "POST /api/auth/login",
    "GET /api/auth/profile",
    "GET /api/ai/models",
    "GET /api/audio",
    "GET /api/video",
    "GET /api/scene",
    "GET /api/avatar",
    "GET /api/stream",
    "GET /ws",
];

pub struct ServiceStatus {
    started_at: Instant,
    stage: Stage,
}

impl ServiceStatus {
    pub fn new(stage: Stage) -> Self {
        Self {
            started_at: Instant::now(),
            stage,
        }
    }
}

pub fn routes(status: Arc<ServiceStatus>) -> Router {
    Router::new()
        .route("/api", get(api_info))
        .route("/api/status", get(service_status))
        .route("/api/v1/health-check", get(health_check))
        .with_state(status)
}

pub async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    info!(%method, %uri, "router: not_found handler invoked");
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "code": StatusCode::NOT_FOUND.as_u16(),
            "error": "Route not found",
            "path": uri.path(),
            "method": method.as_str(),
            "timestamp": Utc::now(),
            "available_routes": AVAILABLE_ROUTES,
        })),
    )
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}

pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "message": "EdAiVi Studio API is running",
        "version": API_VERSION,
        "status": "working",
        "timestamp": Utc::now(),
        "endpoints": AVAILABLE_ROUTES,
    }))
}

pub async fn service_status(State(status): State<Arc<ServiceStatus>>) -> impl IntoResponse {
    Json(json!({
        "status": "online",
        "uptime": status.started_at.elapsed().as_secs_f64(),
        "environment": status.stage.to_string(),
        "timestamp": Utc::now(),
    }))
}
