//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Model3D`] - An uploaded 3D model record
//! - [`FileFormat`] - The closed set of accepted model formats
//!
//! Creation and partial update use separate structs:
//! - [`NewModel3D`] - For inserting new records
//! - [`Model3DPatch`] - For partial updates

pub mod file_format;
pub mod model;

pub use file_format::FileFormat;
pub use model::{Model3D, Model3DPatch, NewModel3D};
