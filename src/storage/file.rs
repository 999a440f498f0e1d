//! JSON File Store
//!
//! Persists the whole key space as one JSON object document. Every
//! mutation loads the document, applies the change, and writes it back;
//! every read re-loads, so callers always observe the latest state on
//! disk.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::storage::KeyValueStore;
use crate::utils::error::AppResult;
use crate::utils::paths::{ensure_dir, storage_path};

pub struct FileStore {
    path: PathBuf,
    /// Serializes load-modify-save cycles within this process. Writers in
    /// other processes still race; last write wins.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store backed by the given file. The parent directory is
    /// created if missing; the file itself is created on first write.
    pub fn open(path: PathBuf) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            ensure_dir(&parent.to_path_buf())?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Open the store at the default location (~/.promptuary/storage.json).
    pub fn open_default() -> AppResult<Self> {
        Self::open(storage_path()?)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load_document(&self) -> AppResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        let doc: Map<String, Value> = serde_json::from_str(&content)?;
        Ok(doc)
    }

    fn save_document(&self, doc: &Map<String, Value>) -> AppResult<()> {
        let content = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.load_document()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.load_document()?;
        doc.insert(key.to_string(), value);
        self.save_document(&doc)
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.load_document()?;
        doc.remove(key);
        self.save_document(&doc)
    }
}
