//! Model upload, retrieval, update and download service.

use std::borrow::Cow;
use std::sync::Arc;

use serde_json::{Value, json};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::entities::{FileFormat, Model3D, Model3DPatch, NewModel3D};
use crate::domain::repositories::ModelRepository;
use crate::domain::storage::{BoxReader, FileStorage, StorageError, StoredFile};
use crate::error::AppError;
use crate::utils::filename::{base_name, validate_flat_filename};

/// Directory under the storage root that holds uploaded models. It is also
/// the only part of the storage root published under `MEDIA_URL`.
pub const UPLOAD_DIR: &str = "models";

/// A file part received in a request, spooled off the connection and ready
/// to be copied into storage.
pub struct UploadedFile {
    /// Filename as sent by the client.
    pub file_name: String,
    /// Size in bytes.
    pub size: u64,
    pub content: BoxReader,
}

/// Fields of an upload request, before any validation.
#[derive(Default)]
pub struct ModelUpload {
    pub name: Option<String>,
    pub file: Option<UploadedFile>,
}

/// Candidate record checked against schema constraints before anything is stored.
#[derive(Debug, Validate)]
struct ModelDraft {
    #[validate(length(min = 1, max = 255))]
    name: String,
    #[validate(custom(function = "validate_stored_file_name"))]
    file_name: String,
    /// Upload size in bytes; errors are reported under `file`.
    #[validate(range(min = 1, message = "The submitted file is empty."))]
    file: u64,
}

/// Replacement file checked before it is stored.
#[derive(Debug, Validate)]
struct FileDraft {
    #[validate(custom(function = "validate_stored_file_name"))]
    file_name: String,
    #[validate(range(min = 1, message = "The submitted file is empty."))]
    file: u64,
}

fn validate_stored_file_name(file_name: &str) -> Result<(), ValidationError> {
    validate_flat_filename(file_name)
        .map(|_| ())
        .map_err(|e| ValidationError::new("file_name").with_message(Cow::Borrowed(e.message())))
}

/// Applies the extension allow-list and strips client directories from the name.
fn inspect_file(file: &UploadedFile) -> Result<(FileFormat, String), AppError> {
    let file_format = FileFormat::from_filename(&file.file_name)
        .map_err(|_| AppError::bad_request("Invalid file format", Value::Null))?;
    Ok((file_format, base_name(&file.file_name).trim().to_string()))
}

fn storage_path(file_name: &str) -> String {
    format!("{}/{}/{}", UPLOAD_DIR, Uuid::new_v4().simple(), file_name)
}

/// Service for the 3D model resource.
///
/// Each upload is copied into [`FileStorage`] under
/// `models/<uuid>/<filename>` and recorded through [`ModelRepository`]. The
/// format is decided from the filename extension alone.
pub struct ModelService {
    repository: Arc<dyn ModelRepository>,
    storage: Arc<dyn FileStorage>,
}

impl ModelService {
    /// Creates a new model service.
    pub fn new(repository: Arc<dyn ModelRepository>, storage: Arc<dyn FileStorage>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    /// Validates an upload, stores its content and inserts the record.
    ///
    /// # Validation order
    ///
    /// 1. A file must be present (`"No file provided"`)
    /// 2. Its extension must be `stl` or `obj`, case-insensitive (`"Invalid file format"`)
    /// 3. `name` (defaulting to the filename) must be 1..=255 characters, the
    ///    filename must be a flat, printable name and the file must not be
    ///    empty (`"Validation failed"` with field details)
    ///
    /// If the insert fails after the file was written, the file is removed
    /// again so no orphan is left behind.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for any of the checks above and
    /// [`AppError::Internal`] on storage or database failures.
    pub async fn create(&self, upload: ModelUpload) -> Result<Model3D, AppError> {
        let file = upload
            .file
            .ok_or_else(|| AppError::bad_request("No file provided", Value::Null))?;

        let (file_format, file_name) = inspect_file(&file)?;
        let draft = ModelDraft {
            name: upload.name.unwrap_or_else(|| file_name.clone()),
            file_name,
            file: file.size,
        };
        draft.validate()?;

        let path = storage_path(&draft.file_name);
        let size = self.storage.put_stream(&path, file.content).await?;

        let new_model = NewModel3D {
            name: draft.name,
            file: path.clone(),
            file_format,
        };

        match self.repository.create(new_model).await {
            Ok(model) => {
                tracing::info!(
                    id = model.id,
                    file = %model.file,
                    format = %model.file_format,
                    size,
                    "Model uploaded"
                );
                Ok(model)
            }
            Err(e) => {
                self.discard(&path).await;
                Err(e)
            }
        }
    }

    /// Lists all models, newest first.
    pub async fn list(&self) -> Result<Vec<Model3D>, AppError> {
        self.repository.list().await
    }

    /// Retrieves a model by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no model has this id.
    pub async fn get(&self, id: i64) -> Result<Model3D, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Updates a model's name and/or format, optionally replacing its file.
    ///
    /// A replacement file goes through the same allow-list as an upload and
    /// decides the new `file_format`; an explicit `file_format` that names a
    /// different format is rejected. The new file is stored before the row
    /// is updated and the previous file is removed only once the update
    /// succeeded. Without a file, an empty patch returns the current record
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no model has this id and
    /// [`AppError::Validation`] if the replacement file is rejected.
    pub async fn update(
        &self,
        id: i64,
        mut patch: Model3DPatch,
        file: Option<UploadedFile>,
    ) -> Result<Model3D, AppError> {
        let Some(file) = file else {
            patch.file = None;
            if patch.is_empty() {
                return self.get(id).await;
            }

            let model = self
                .repository
                .update(id, patch)
                .await?
                .ok_or_else(|| not_found(id))?;

            tracing::info!(id, name = %model.name, format = %model.file_format, "Model updated");
            return Ok(model);
        };

        let previous = self.get(id).await?;

        let (file_format, file_name) = inspect_file(&file)?;
        if patch.file_format.is_some_and(|f| f != file_format) {
            return Err(AppError::bad_request(
                "Invalid file format",
                json!({ "file_format": ["Does not match the extension of the uploaded file."] }),
            ));
        }

        let draft = FileDraft {
            file_name,
            file: file.size,
        };
        draft.validate()?;

        let path = storage_path(&draft.file_name);
        self.storage.put_stream(&path, file.content).await?;

        patch.file = Some(path.clone());
        patch.file_format = Some(file_format);

        match self.repository.update(id, patch).await {
            Ok(Some(model)) => {
                self.remove_file(id, &previous.file).await;
                tracing::info!(id, file = %model.file, format = %model.file_format, "Model file replaced");
                Ok(model)
            }
            Ok(None) => {
                self.discard(&path).await;
                Err(not_found(id))
            }
            Err(e) => {
                self.discard(&path).await;
                Err(e)
            }
        }
    }

    /// Deletes a model and then its stored file.
    ///
    /// File removal is best-effort: a failure is logged and the delete still
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no model has this id.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let model = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        self.remove_file(id, &model.file).await;

        tracing::info!(id, "Model deleted");
        Ok(())
    }

    /// Looks up a model and opens its stored file for download.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no model has this id, and
    /// [`AppError::Gone`] if the record exists but its file is missing.
    pub async fn open_file(&self, id: i64) -> Result<(Model3D, StoredFile), AppError> {
        let model = self.get(id).await?;

        match self.storage.open(&model.file).await {
            Ok(stored) => Ok((model, stored)),
            Err(StorageError::NotFound(path)) => {
                tracing::warn!(id, path = %path, "Stored file missing for existing model");
                Err(AppError::gone(
                    "Model file is no longer available",
                    json!({ "id": id }),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Runs a trivial query against record storage.
    pub async fn ping_database(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Reports whether file storage can accept writes.
    pub async fn storage_available(&self) -> bool {
        self.storage.health_check().await
    }

    /// Removes a file the record no longer points to.
    async fn remove_file(&self, id: i64, path: &str) {
        match self.storage.delete(path).await {
            Ok(true) => {}
            Ok(false) => tracing::warn!(id, file = %path, "Model had no stored file"),
            Err(e) => tracing::warn!(id, file = %path, error = %e, "Failed to remove stored file"),
        }
    }

    /// Removes a file written for a record change that did not happen.
    async fn discard(&self, path: &str) {
        if let Err(e) = self.storage.delete(path).await {
            tracing::warn!(error = %e, path = %path, "Failed to remove file after a failed write");
        }
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found("Model not found", json!({ "id": id }))
}
