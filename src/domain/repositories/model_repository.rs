//! Repository trait for Model3D record access.

use crate::domain::entities::{Model3D, Model3DPatch, NewModel3D};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for 3D model records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgModelRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_model.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelRepository: Send + Sync {
    /// Inserts a new record and returns it with its assigned id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_model: NewModel3D) -> Result<Model3D, AppError>;

    /// Finds a record by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Model3D))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: i64) -> Result<Option<Model3D>, AppError>;

    /// Lists all records, newest first.
    async fn list(&self) -> Result<Vec<Model3D>, AppError>;

    /// Applies a partial update.
    ///
    /// Returns `Ok(None)` if no record matches `id`.
    async fn update(&self, id: i64, patch: Model3DPatch) -> Result<Option<Model3D>, AppError>;

    /// Deletes a record, returning the removed row.
    ///
    /// Returns `Ok(None)` if no record matches `id`.
    async fn delete(&self, id: i64) -> Result<Option<Model3D>, AppError>;

    /// Connectivity check used by the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;
}
