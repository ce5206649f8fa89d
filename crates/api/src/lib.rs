//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for image upload, list, view and delete
//! - JSON error responses
//! - Health check

pub mod error;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use picvault_core::storage::StorageService;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Object storage for image bytes.
    pub storage: Arc<StorageService>,
    /// Maximum accepted request body size.
    pub max_upload_bytes: usize,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback(error::route_not_found)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
