mod middleware;
mod routes;
mod structs;
mod utils;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::routes::build_router;
use crate::utils::config::Config;
use crate::utils::picture_store::{PictureStore, PUBLIC_UPLOADS_PREFIX};
use crate::utils::player_repository::{PgPlayerRepository, PlayerRepository};

pub struct AppState {
    pub players: Arc<dyn PlayerRepository>,
    pub pictures: PictureStore,
    pub write_timeout: Duration,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "player_registration=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Invalid configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(config.database_timeout)
        .connect(&config.database_url)
        .await
        .context("Failed to create database pool")?;

    let pictures = PictureStore::new(&config.upload_dir, PUBLIC_UPLOADS_PREFIX)
        .await
        .context("Failed to prepare upload directory")?;
    info!("Saving pictures to {}", pictures.root().display());

    let app_state = Arc::new(AppState {
        players: Arc::new(PgPlayerRepository::new(pool.clone())),
        pictures,
        write_timeout: config.database_timeout,
    });

    let router = build_router(app_state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {addr}");

    axum::Server::try_bind(&addr)
        .with_context(|| format!("Failed to bind {addr}"))?
        .serve(router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Error listening for shutdown signal : {e}");
    }
}
