//! Reading model forms from `multipart/form-data` requests.
//!
//! File parts are never held in memory: each chunk is appended to a spool
//! file in the system temp directory, which storage then copies from. The
//! spool file is removed when the [`ModelForm`] that owns it is dropped.

use std::path::PathBuf;

use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;
use serde_json::{Value, json};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::application::services::UploadedFile;
use crate::error::AppError;

/// Temporary copy of a file part, deleted on drop.
struct SpoolFile {
    path: PathBuf,
}

impl SpoolFile {
    fn new() -> Self {
        Self {
            path: std::env::temp_dir().join(format!("model3d-upload-{}", Uuid::new_v4())),
        }
    }
}

impl Drop for SpoolFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Parts of a model form: `file`, `name` and `file_format`. Other parts are
/// ignored.
///
/// Keep the form alive until its `file` has been consumed; dropping it
/// removes the spooled content.
#[derive(Default)]
pub struct ModelForm {
    pub name: Option<String>,
    pub file_format: Option<String>,
    pub file: Option<UploadedFile>,
    _spool: Option<SpoolFile>,
}

/// Reads every part of a model form.
///
/// A `file` part without a filename is a plain form field, not a file, and
/// is skipped. If several file parts are sent, the last one wins.
///
/// # Errors
///
/// - 413 when the body exceeds the configured upload limit
/// - 400 for malformed multipart bodies
pub async fn read_model_form(mut multipart: Multipart) -> Result<ModelForm, AppError> {
    let mut form = ModelForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("file") => {
                let Some(file_name) = field
                    .file_name()
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                else {
                    continue;
                };
                let (file, spool) = spool_field(field, file_name).await?;
                form.file = Some(file);
                form._spool = Some(spool);
            }
            Some("name") => {
                form.name = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("file_format") => {
                form.file_format = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn spool_field(
    mut field: Field<'_>,
    file_name: String,
) -> Result<(UploadedFile, SpoolFile), AppError> {
    let spool = SpoolFile::new();

    let mut out = fs::File::create(&spool.path).await.map_err(spool_error)?;
    let mut size: u64 = 0;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        size += chunk.len() as u64;
        out.write_all(&chunk).await.map_err(spool_error)?;
    }

    out.flush().await.map_err(spool_error)?;
    drop(out);

    let content = fs::File::open(&spool.path).await.map_err(spool_error)?;

    let file = UploadedFile {
        file_name,
        size,
        content: Box::new(content),
    };
    Ok((file, spool))
}

fn spool_error(e: std::io::Error) -> AppError {
    AppError::internal(
        "Failed to buffer upload",
        json!({ "reason": e.to_string() }),
    )
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::payload_too_large("Upload is too large", Value::Null);
    }
    AppError::bad_request(
        "Malformed multipart request",
        json!({ "reason": e.body_text() }),
    )
}
