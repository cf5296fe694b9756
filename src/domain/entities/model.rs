//! Model3D entity representing one uploaded 3D model.

use chrono::{DateTime, Utc};

use super::FileFormat;

/// A stored 3D model record.
///
/// `file` is the storage-relative path of the uploaded content; the bytes
/// themselves belong to the file storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Model3D {
    pub id: i64,
    pub name: String,
    pub file: String,
    pub file_format: FileFormat,
    pub created_at: DateTime<Utc>,
}

impl Model3D {
    /// Creates a new Model3D instance.
    pub fn new(
        id: i64,
        name: String,
        file: String,
        file_format: FileFormat,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            file,
            file_format,
            created_at,
        }
    }

    /// Basename of the stored file, used as the download filename.
    pub fn file_name(&self) -> &str {
        self.file.rsplit('/').next().unwrap_or(&self.file)
    }
}

/// Input data for inserting a new record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewModel3D {
    pub name: String,
    pub file: String,
    pub file_format: FileFormat,
}

/// Partial update for an existing record.
///
/// `None` fields are left unchanged. `file` points the record at newly
/// stored content; the previous file is the caller's to remove.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model3DPatch {
    pub name: Option<String>,
    pub file: Option<String>,
    pub file_format: Option<FileFormat>,
}

impl Model3DPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.file.is_none() && self.file_format.is_none()
    }
}
