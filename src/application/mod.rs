//! Application layer services implementing business logic.
//!
//! Services coordinate record storage and file storage, apply validation
//! rules, and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::model_service::ModelService`] - Upload, query, update, delete and download of 3D models

pub mod services;
