//! Persistence of the roster and queue collections
//!
//! Each collection lives under a fixed key and is written back whole on
//! every save. There is no append log and no versioning.

use crate::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const STUDENTS_KEY: &str = "mess_students";
pub const QUEUE_KEY: &str = "mess_queue";

/// Key/value store holding serialized collections
pub trait Store {
    /// Read the value stored under `key`, `None` if it was never written
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the storage directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn file_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Store for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.file_path(key);
        if !path.exists() {
            debug!("Store file not found: {}", path.display());
            return Ok(None);
        }

        debug!("Loading {} from: {}", key, path.display());
        let contents = fs::read_to_string(&path)?;
        Ok(Some(contents))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.file_path(key);

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, value)?;
        info!("Saved {} to: {}", key, path.display());
        Ok(())
    }
}

/// In-process store, single writer
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
