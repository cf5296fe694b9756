//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/models/*`     - Model resource (see [`crate::api::routes::model_routes`])
//! - `GET /health`   - Health check: database and storage
//! - `{MEDIA_URL}/models/*` - Uploaded files, served read-only
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling, so `/models/` and
//!   `/models/{id}/download/` resolve like their slash-less forms

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::application::services::UPLOAD_DIR;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::path::Path;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `media_root` - storage root; only its upload directory is served,
///   under `{state.media_url}/models`
/// - `max_upload_size` - request body limit for the model routes, in bytes
pub fn app_router(
    state: AppState,
    media_root: &Path,
    max_upload_size: usize,
) -> NormalizePath<Router> {
    let uploads_url = format!("{}/{}", state.media_url, UPLOAD_DIR);

    let router = Router::new()
        .merge(api::routes::model_routes(max_upload_size))
        .route("/health", get(health_handler))
        .nest_service(&uploads_url, ServeDir::new(media_root.join(UPLOAD_DIR)))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
