pub mod register_player_route;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{middleware as axum_middleware, routing::post, Router};

use crate::middleware::cors_middleware::{preflight_middleware, with_cors_headers};
use crate::middleware::logger_middleware::logger_middleware;
use crate::utils::config::Config;
use crate::AppState;
use register_player_route::register_player_route;

pub fn build_router(app_state: Arc<AppState>, config: &Config) -> Router {
    let router = Router::new()
        .route("/api/players", post(register_player_route))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(axum_middleware::from_fn(preflight_middleware))
        .with_state(app_state);

    with_cors_headers(router, config.allow_origin.clone())
        .layer(axum_middleware::from_fn(logger_middleware))
}
