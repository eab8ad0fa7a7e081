//! Client-local persistent storage.
//!
//! The cart and the access token survive restarts through a small key-value
//! store, every key living under a fixed `storefront:` namespace. A
//! file-backed implementation is provided for real use and an in-memory one
//! for tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::errors::StorefrontError;

/// Namespace prefixed onto every stored key.
pub const NAMESPACE: &str = "storefront";

fn namespaced(key: &str) -> String {
    format!("{NAMESPACE}:{key}")
}

/// String key-value store with JSON payloads.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorefrontError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorefrontError>;
    fn remove(&self, key: &str) -> Result<(), StorefrontError>;
}

/// File-backed store: the whole map is kept in memory and rewritten to a
/// single JSON file on every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, reading existing entries if the file is
    /// already present.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorefrontError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)
                .map_err(|e| StorefrontError::Storage(format!("read {}: {e}", path.display())))?;
            serde_json::from_str(&raw)?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), StorefrontError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorefrontError::Storage(format!("create {}: {e}", parent.display()))
                })?;
            }
        }
        let raw = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, raw)
            .map_err(|e| StorefrontError::Storage(format!("write {}: {e}", self.path.display())))
    }

    fn lock_poisoned() -> StorefrontError {
        StorefrontError::Storage("storage lock poisoned".to_string())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorefrontError> {
        let entries = self.entries.read().map_err(|_| Self::lock_poisoned())?;
        Ok(entries.get(&namespaced(key)).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorefrontError> {
        let mut entries = self.entries.write().map_err(|_| Self::lock_poisoned())?;
        entries.insert(namespaced(key), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorefrontError> {
        let mut entries = self.entries.write().map_err(|_| Self::lock_poisoned())?;
        if entries.remove(&namespaced(key)).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorefrontError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorefrontError::Storage("storage lock poisoned".to_string()))?;
        Ok(entries.get(&namespaced(key)).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorefrontError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorefrontError::Storage("storage lock poisoned".to_string()))?;
        entries.insert(namespaced(key), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorefrontError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorefrontError::Storage("storage lock poisoned".to_string()))?;
        entries.remove(&namespaced(key));
        Ok(())
    }
}
