use std::sync::Arc;

use anyhow::Result;
use edaivi_studio::{
    config::config_loader,
    infrastructure::{
        axum_http::http_serve,
        memory::{memory_database::MemoryDatabase, seed},
    },
    observability,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Server exited with error: {:#}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability("edaivi-studio")?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let db = Arc::new(MemoryDatabase::new());
    seed::seed(&db, &dotenvy_env.seed).await?;
    info!("In-memory store has been seeded");

    http_serve::start(Arc::new(dotenvy_env), db).await?;

    Ok(())
}
