//! Utility functions used across the application.
//!
//! - [`filename`] - Upload filename sanitization and validation
//! - [`content_disposition`] - Safe `Content-Disposition` header values

pub mod content_disposition;
pub mod filename;
