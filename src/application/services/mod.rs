//! Business logic services for the application layer.

pub mod model_service;

pub use model_service::{ModelService, ModelUpload, UPLOAD_DIR, UploadedFile};
