//! File storage contract for uploaded model content.
//!
//! Records only hold a storage-relative path; the bytes live behind a
//! [`FileStorage`] implementation. The production implementation is
//! [`crate::infrastructure::storage::LocalFileStorage`].

use async_trait::async_trait;
use tokio::io::AsyncRead;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Errors that can occur during file storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No file exists at the requested path.
    #[error("file not found: {0}")]
    NotFound(String),
    /// The path is absolute or escapes the storage root.
    #[error("invalid storage path: {0}")]
    InvalidPath(String),
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An opened stored file ready to be streamed.
///
/// Dropping the reader closes the underlying handle.
pub struct StoredFile {
    pub reader: BoxReader,
    pub size: u64,
}

/// Storage for uploaded file content addressed by relative path.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Copies `reader` to `path`, creating parent directories as needed, and
    /// returns the number of bytes written.
    ///
    /// The write is atomic from a reader's point of view: content appears
    /// under `path` only once it is complete.
    async fn put_stream(&self, path: &str, reader: BoxReader) -> Result<u64, StorageError>;

    /// Opens the file at `path` for streaming.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if nothing is stored at `path`.
    async fn open(&self, path: &str) -> Result<StoredFile, StorageError>;

    /// Deletes the file at `path`.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn delete(&self, path: &str) -> Result<bool, StorageError>;

    /// Checks that the storage root is usable.
    async fn health_check(&self) -> bool;
}
