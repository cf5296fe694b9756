//! Local file system implementation of [`FileStorage`].

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufReader};

use crate::domain::storage::{BoxReader, FileStorage, StorageError, StoredFile};

const TEMP_DIR: &str = ".tmp";

/// Stores files under a root directory using their relative path as-is.
///
/// Writes land in `{root}/.tmp` first and are renamed into place, so a
/// crashed upload never leaves a truncated file at its final path. Only
/// the upload directory is published over HTTP, never the root itself.
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Creates the storage, making sure the root and temp directories exist.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(root.join(TEMP_DIR)).await?;
        Ok(Self { root })
    }

    /// Root directory of this storage.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a relative storage path onto the file system.
    ///
    /// Only plain path segments are accepted; absolute paths, `..` and the
    /// temp directory are rejected.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let mut segments = 0;

        for component in relative.components() {
            match component {
                Component::Normal(segment) if segment != TEMP_DIR => segments += 1,
                _ => return Err(StorageError::InvalidPath(path.to_string())),
            }
        }

        if segments == 0 {
            return Err(StorageError::InvalidPath(path.to_string()));
        }

        Ok(self.root.join(relative))
    }

    fn temp_path(&self) -> PathBuf {
        self.root
            .join(TEMP_DIR)
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn put_stream(&self, path: &str, mut reader: BoxReader) -> Result<u64, StorageError> {
        let target = self.resolve(path)?;
        let temp_path = self.temp_path();

        let write = async {
            let mut file = fs::File::create(&temp_path).await?;
            let written = tokio::io::copy(&mut reader, &mut file).await?;
            file.flush().await?;
            drop(file);

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::rename(&temp_path, &target).await?;
            Ok::<_, std::io::Error>(written)
        };

        match write.await {
            Ok(written) => Ok(written),
            Err(e) => {
                let _ = fs::remove_file(&temp_path).await;
                Err(e.into())
            }
        }
    }

    async fn open(&self, path: &str) -> Result<StoredFile, StorageError> {
        let target = self.resolve(path)?;

        let file = match fs::File::open(&target).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(path.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(StorageError::NotFound(path.to_string()));
        }

        Ok(StoredFile {
            reader: Box::new(BufReader::new(file)),
            size: metadata.len(),
        })
    }

    async fn delete(&self, path: &str) -> Result<bool, StorageError> {
        let target = self.resolve(path)?;

        match fs::remove_file(&target).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        }

        // Each upload owns its directory; drop it once empty.
        if let Some(parent) = target.parent()
            && parent != self.root
        {
            let _ = fs::remove_dir(parent).await;
        }

        Ok(true)
    }

    async fn health_check(&self) -> bool {
        fs::metadata(self.root.join(TEMP_DIR))
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}
