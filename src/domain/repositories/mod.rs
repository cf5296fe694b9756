//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for record storage; the PostgreSQL
//! implementation lives in `crate::infrastructure::persistence`.
//! Mock implementations are auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`ModelRepository`] - Model3D record CRUD operations

pub mod model_repository;

pub use model_repository::ModelRepository;

#[cfg(test)]
pub use model_repository::MockModelRepository;
