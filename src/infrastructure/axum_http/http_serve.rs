use std::{any::Any, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Extension, Router,
    handler::HandlerWithoutStateExt,
    http::{
        Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::{
    application::usecases::auth::AuthUseCase,
    config::{config_loader, config_model::DotEnvyConfig},
    infrastructure::{
        axum_http::{
            auth::SessionAuth,
            default_routers::{self, ServiceStatus},
            error_responses::AppError,
            routers,
        },
        memory::{memory_database::MemoryDatabase, repositories::users::UserMemory},
        realtime::hub::RoomHub,
        security::jwt::JwtSessionTokens,
    },
};

/// Builds the full application router over the given store.
pub fn app(config: &DotEnvyConfig, db: Arc<MemoryDatabase>, hub: Arc<RoomHub>) -> Result<Router> {
    let session_auth: Arc<SessionAuth> = Arc::new(AuthUseCase::new(
        Arc::new(UserMemory::new(Arc::clone(&db))),
        Arc::new(JwtSessionTokens::from_config(&config.auth)),
        config.auth.clone(),
    ));

    let static_files = ServeDir::new(&config.server.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(default_routers::not_found.into_service());

    let app = Router::new()
        .fallback_service(static_files)
        .nest("/api/auth", routers::auth::routes(Arc::clone(&session_auth)))
        .nest("/api/ai", routers::ai::routes(Arc::clone(&db)))
        .nest("/api/audio", routers::audio_projects::routes(Arc::clone(&db)))
        .nest("/api/video", routers::video_projects::routes(Arc::clone(&db)))
        .nest("/api/scene", routers::scenes::routes(Arc::clone(&db)))
        .nest("/api/avatar", routers::avatars::routes(Arc::clone(&db)))
        .nest("/api/stream", routers::streams::routes(Arc::clone(&db)))
        .merge(routers::realtime::routes(hub))
        .merge(default_routers::routes(Arc::new(ServiceStatus::new(
            config_loader::get_stage(),
        ))))
        .layer(Extension(session_auth))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(timeout_layer(Duration::from_secs(config.server.timeout)))
        .layer(RequestBodyLimitLayer::new(
            (config.server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(AnyOrigin),
        )
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

pub async fn start(config: Arc<DotEnvyConfig>, db: Arc<MemoryDatabase>) -> Result<()> {
    let app = app(&config, db, Arc::new(RoomHub::default()))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(detail, "http: handler panicked");

    AppError::Panic.into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install terminate signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
