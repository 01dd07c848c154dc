use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};
use tracing::{debug, info};

use crate::errors::StorageError;

/// A single JSON document read and written wholesale.
///
/// Writers are serialized through `write_lock`, so a read-modify-write never
/// interleaves with another one. Every write lands in a sibling temp file that
/// is flushed and renamed over the document, so readers observe either the old
/// or the new document, never a partial one.
pub struct JsonDocument<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonDocument {
            path: path.into(),
            write_lock: Mutex::new(()),
            _doc: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document, creating it with `T::default()` when absent.
    pub async fn load(&self) -> Result<T, StorageError> {
        match self.read().await? {
            Some(doc) => Ok(doc),
            None => {
                let _guard = self.write_lock.lock().await;
                self.load_or_init().await
            }
        }
    }

    /// Runs `mutate` against the current document under the write lock.
    /// The document is persisted only when `mutate` returns `Ok(Some(_))`.
    pub async fn modify<R, F>(&self, mutate: F) -> Result<Option<R>, StorageError>
    where
        F: FnOnce(&mut T) -> Result<Option<R>, StorageError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.load_or_init().await?;

        match mutate(&mut doc)? {
            Some(result) => {
                self.write(&doc).await?;
                Ok(Some(result))
            }
            None => Ok(None),
        }
    }

    // Caller must hold `write_lock`.
    async fn load_or_init(&self) -> Result<T, StorageError> {
        if let Some(doc) = self.read().await? {
            return Ok(doc);
        }

        info!(path = %self.path.display(), "Data file not found, initializing");
        let doc = T::default();
        self.write(&doc).await?;
        Ok(doc)
    }

    async fn read(&self) -> Result<Option<T>, StorageError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Malformed(self.path.display().to_string(), e.to_string()))
    }

    async fn write(&self, doc: &T) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(doc)?;
        let temp_path = self.temp_path();

        if let Err(e) = Self::replace_with(&temp_path, &self.path, json.as_bytes()).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(self.io_error(e));
        }

        debug!(path = %self.path.display(), bytes = json.len(), "Data file written");
        Ok(())
    }

    async fn replace_with(temp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(temp_path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(temp_path, path).await
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "data.json".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }

    fn io_error(&self, err: std::io::Error) -> StorageError {
        StorageError::Io(self.path.display().to_string(), err.to_string())
    }
}
