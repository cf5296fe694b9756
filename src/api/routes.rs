//! API route configuration.

use crate::api::handlers::{
    create_model_handler, delete_model_handler, download_model_handler, get_model_handler,
    list_models_handler, replace_model_handler, update_model_handler,
};
use crate::state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::get};

/// Routes of the model resource.
///
/// # Endpoints
///
/// - `GET    /models`               - List models
/// - `POST   /models`               - Upload a model (multipart)
/// - `GET    /models/{id}`          - Retrieve a model
/// - `PUT    /models/{id}`          - Replace a model's metadata
/// - `PATCH  /models/{id}`          - Partially update a model's metadata
/// - `DELETE /models/{id}`          - Delete a model and its file
/// - `GET    /models/{id}/download` - Download the stored file
///
/// Request bodies are capped at `max_upload_size` bytes.
pub fn model_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/models",
            get(list_models_handler).post(create_model_handler),
        )
        .route(
            "/models/{id}",
            get(get_model_handler)
                .put(replace_model_handler)
                .patch(update_model_handler)
                .delete(delete_model_handler),
        )
        .route("/models/{id}/download", get(download_model_handler))
        .layer(DefaultBodyLimit::max(max_upload_size))
}
