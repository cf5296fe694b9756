//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod models;

pub use health::health_handler;
pub use models::{
    create_model_handler, delete_model_handler, download_model_handler, get_model_handler,
    list_models_handler, replace_model_handler, update_model_handler,
};
