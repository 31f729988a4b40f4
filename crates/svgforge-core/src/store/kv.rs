use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ForgeError;

/// String key-value storage the conversation list is persisted into.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, ForgeError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ForgeError>;
    fn remove(&mut self, key: &str) -> Result<(), ForgeError>;
}

/// One `<key>.json` file per key inside `base_dir`.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create the store, making sure `base_dir` exists.
    pub fn with_dir(base_dir: impl Into<PathBuf>) -> Result<Self, ForgeError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|e| {
            ForgeError::Storage(format!(
                "Failed to create data directory {}: {}",
                base_dir.display(),
                e
            ))
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, ForgeError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| ForgeError::Storage(format!("Failed to read {}: {}", path.display(), e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ForgeError> {
        let path = self.entry_path(key);
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, value).map_err(|e| {
            ForgeError::Storage(format!("Failed to write temporary file: {}", e))
        })?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            ForgeError::Storage(format!("Failed to rename {}: {}", tmp_path.display(), e))
        })?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ForgeError> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Process-local storage; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, ForgeError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ForgeError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ForgeError> {
        self.entries.remove(key);
        Ok(())
    }
}
