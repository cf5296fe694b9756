//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::ModelService;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub model_service: Arc<ModelService>,
    /// Public URL prefix of stored files, e.g. `/media`.
    pub media_url: Arc<str>,
}

impl AppState {
    pub fn new(model_service: Arc<ModelService>, media_url: impl Into<Arc<str>>) -> Self {
        Self {
            model_service,
            media_url: media_url.into(),
        }
    }
}
