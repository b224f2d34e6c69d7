//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api;
use crate::models::AppConfig;

/// Application state shared across all handlers. The transform pipelines
/// themselves are stateless; only configuration lives here.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

/// Create application state from a resolved configuration.
pub fn create_app_state(config: AppConfig) -> AppState {
    AppState {
        config: Arc::new(config),
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. CORS is
/// wide open so the frontend can be hosted on another origin; harmless
/// for same-origin use.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.max_upload_bytes;

    Router::new()
        // Transform endpoints
        .route("/iconize", post(api::handle_iconize))
        .route("/pixelate", post(api::handle_pixelate))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
