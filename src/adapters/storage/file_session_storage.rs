//! File-based Session Storage Adapter
//!
//! Keeps the persisted session as a YAML map in a single file. Writes go to a
//! sibling temp file first and are renamed over the original, so a crash never
//! leaves a half-written session behind.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::ports::{SessionStorage, StorageError};

/// File-based storage for the persisted session
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file.
    lock: Arc<Mutex<()>>,
}

impl FileSessionStorage {
    /// Create a storage backed by the file at `path`
    ///
    /// The file and its parent directory are created on first write.
    ///
    /// # Example
    /// ```ignore
    /// let storage = FileSessionStorage::new("./data/session.yaml");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let yaml = fs::read_to_string(&self.path)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        if yaml.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_yaml::from_str(&yaml).map_err(|e| StorageError::DeserializationFailed(e.to_string()))
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StorageError::IoError(e.to_string()))?;
            }
        }

        let yaml = serde_yaml::to_string(map)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, yaml)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        let map = self.read_map().await?;
        Ok(map.get(key).cloned())
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;

        // An unreadable file is overwritten rather than blocking every write.
        let mut map = match self.read_map().await {
            Ok(map) => map,
            Err(StorageError::DeserializationFailed(reason)) => {
                tracing::warn!(path = %self.path.display(), %reason, "Overwriting corrupt session file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };

        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }

        self.write_map(&map).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;

        if self.path.exists() {
            fs::remove_file(&self.path)
                .await
                .map_err(|e| StorageError::IoError(e.to_string()))?;
        }

        Ok(())
    }
}
