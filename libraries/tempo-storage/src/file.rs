//! JSON file-backed key-value store
//!
//! The whole map lives in one JSON object on disk. Writes go to a sibling
//! temp file that is then renamed over the original, so a crash mid-write
//! leaves the previous contents intact.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Result, StorageError};
use crate::kv::KeyValueStore;

type Items = BTreeMap<String, String>;

/// Key-value store persisted as a JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Store backed by `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_items(&self) -> Result<Items> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Items::new()),
            Err(e) => {
                return Err(StorageError::read(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if text.trim().is_empty() {
            return Ok(Items::new());
        }

        serde_json::from_str(&text)
            .map_err(|e| StorageError::read(format!("{}: {}", self.path.display(), e)))
    }

    async fn write_items(&self, items: &Items) -> Result<()> {
        let text = serde_json::to_string_pretty(items)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StorageError::write(format!("{}: {}", parent.display(), e)))?;
            }
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, text)
            .await
            .map_err(|e| StorageError::write(format!("{}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StorageError::write(format!("{}: {}", self.path.display(), e)))?;

        debug!("Wrote {} keys to {}", items.len(), self.path.display());
        Ok(())
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
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_items().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;
        items.insert(key.to_string(), value.to_string());
        self.write_items(&items).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;
        if items.remove(key).is_some() {
            self.write_items(&items).await?;
        }
        Ok(())
    }
}
