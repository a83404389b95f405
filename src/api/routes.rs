//! HTTP API route definitions.

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use super::cors::cors_layer;
use super::handlers::{
    create_user, delete_user, get_user, health, list_users, update_user, AppState,
};
use crate::config::Config;
use crate::error::Result;

/// Create the full service router: JSON API, frontend files, tracing and CORS.
pub fn create_router(state: AppState, config: &Config) -> Result<Router> {
    let cors = cors_layer(config.cors_header_values()?);

    Ok(Router::new()
        .merge(api_router(state))
        .merge(frontend_router(&config.frontend_dist))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors))
}

/// Create the JSON API router.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/api/health", get(health))
        // User endpoints
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(state)
}

/// Serve the prebuilt frontend from `dist`.
pub fn frontend_router(dist: &Path) -> Router {
    Router::new()
        .nest_service("/assets", ServeDir::new(dist.join("assets")))
        .route_service("/vite.svg", ServeFile::new(dist.join("vite.svg")))
        .route_service("/", ServeFile::new(dist.join("index.html")))
}
