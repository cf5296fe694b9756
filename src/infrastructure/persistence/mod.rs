//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgModelRepository`] - Model3D record storage and retrieval

pub mod pg_model_repository;

pub use pg_model_repository::PgModelRepository;
