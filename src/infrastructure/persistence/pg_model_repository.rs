//! PostgreSQL implementation of model repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{FileFormat, Model3D, Model3DPatch, NewModel3D};
use crate::domain::repositories::ModelRepository;
use crate::error::AppError;

/// PostgreSQL repository for Model3D records.
pub struct PgModelRepository {
    pool: Arc<PgPool>,
}

impl PgModelRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ModelRow {
    id: i64,
    name: String,
    file: String,
    file_format: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ModelRow> for Model3D {
    type Error = AppError;

    fn try_from(row: ModelRow) -> Result<Self, Self::Error> {
        let file_format: FileFormat = row.file_format.parse().map_err(|_| {
            AppError::internal(
                "Stored model has an unknown file format",
                json!({ "id": row.id, "file_format": row.file_format }),
            )
        })?;

        Ok(Model3D::new(
            row.id,
            row.name,
            row.file,
            file_format,
            row.created_at,
        ))
    }
}

#[async_trait]
impl ModelRepository for PgModelRepository {
    async fn create(&self, new_model: NewModel3D) -> Result<Model3D, AppError> {
        let row = sqlx::query_as::<_, ModelRow>(
            r#"
            INSERT INTO models (name, file, file_format)
            VALUES ($1, $2, $3)
            RETURNING id, name, file, file_format, created_at
            "#,
        )
        .bind(&new_model.name)
        .bind(&new_model.file)
        .bind(new_model.file_format.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Model3D>, AppError> {
        let row = sqlx::query_as::<_, ModelRow>(
            r#"
            SELECT id, name, file, file_format, created_at
            FROM models
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Model3D::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Model3D>, AppError> {
        let rows = sqlx::query_as::<_, ModelRow>(
            r#"
            SELECT id, name, file, file_format, created_at
            FROM models
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Model3D::try_from).collect()
    }

    async fn update(&self, id: i64, patch: Model3DPatch) -> Result<Option<Model3D>, AppError> {
        let row = sqlx::query_as::<_, ModelRow>(
            r#"
            UPDATE models
            SET name        = COALESCE($2, name),
                file        = COALESCE($3, file),
                file_format = COALESCE($4, file_format)
            WHERE id = $1
            RETURNING id, name, file, file_format, created_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.file)
        .bind(patch.file_format.map(|f| f.as_str()))
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Model3D::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> Result<Option<Model3D>, AppError> {
        let row = sqlx::query_as::<_, ModelRow>(
            r#"
            DELETE FROM models
            WHERE id = $1
            RETURNING id, name, file, file_format, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Model3D::try_from).transpose()
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
