//! Persistent key/value storage
//!
//! The string-to-string store the TTL cache sits on. Writes may fail
//! (quota, disabled storage); callers above this layer treat every
//! failure as a miss or a no-op.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use thiserror::Error;
use tracing::{debug, warn};

// == Storage Error ==
#[derive(Error, Debug)]
pub enum StorageError {
    /// Storage is disabled or its lock is poisoned
    #[error("storage unavailable")]
    Unavailable,

    /// Write would exceed the storage quota
    #[error("quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

// == Storage Trait ==
/// Origin-scoped persistent string storage.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// All keys currently stored.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

fn used_bytes(items: &HashMap<String, String>) -> usize {
    items.iter().map(|(k, v)| k.len() + v.len()).sum()
}

// == Memory Storage ==
/// In-memory storage with an optional byte quota.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
    disabled: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage rejecting writes that would exceed `quota` bytes of keys and values.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Makes every operation fail with [`StorageError::Unavailable`].
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    fn check_enabled(&self) -> Result<(), StorageError> {
        if self.disabled.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_enabled()?;
        let items = self.items.read().map_err(|_| StorageError::Unavailable)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        let mut items = self.items.write().map_err(|_| StorageError::Unavailable)?;

        if let Some(quota) = self.quota {
            let replaced = items.get(key).map_or(0, |old| key.len() + old.len());
            let needed = used_bytes(&items) - replaced + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        let mut items = self.items.write().map_err(|_| StorageError::Unavailable)?;
        items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.check_enabled()?;
        let items = self.items.read().map_err(|_| StorageError::Unavailable)?;
        Ok(items.keys().cloned().collect())
    }
}

// == File Storage ==
/// Storage persisted as a single JSON object on disk.
///
/// A missing or corrupted file loads as empty storage. Every mutation
/// rewrites the file through a temporary sibling and a rename.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let items = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "cache file is corrupt, starting empty");
                HashMap::new()
            }),
            Err(_) => {
                debug!(path = %path.display(), "no cache file yet");
                HashMap::new()
            }
        };

        Self {
            path,
            items: RwLock::new(items),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &HashMap<String, String>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(items)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.read().map_err(|_| StorageError::Unavailable)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::Unavailable)?;
        let previous = items.insert(key.to_string(), value.to_string());

        if let Err(err) = self.persist(&items) {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => items.insert(key.to_string(), old),
                None => items.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::Unavailable)?;
        if let Some(old) = items.remove(key) {
            if let Err(err) = self.persist(&items) {
                items.insert(key.to_string(), old);
                return Err(err);
            }
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let items = self.items.read().map_err(|_| StorageError::Unavailable)?;
        Ok(items.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_set_get_remove() {
        let storage = MemoryStorage::new();
        storage.set_item("a", "1").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));

        storage.remove_item("a").unwrap();
        assert_eq!(storage.get_item("a").unwrap(), None);
    }

    #[test]
    fn test_memory_quota() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "12345").unwrap();

        let err = storage.set_item("k2", "123456").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));

        // Replacing an existing value only counts the difference
        storage.set_item("k", "123456789").unwrap();
    }

    #[test]
    fn test_memory_disabled() {
        let storage = MemoryStorage::new();
        storage.set_disabled(true);
        assert!(matches!(storage.get_item("a"), Err(StorageError::Unavailable)));
        assert!(matches!(storage.set_item("a", "b"), Err(StorageError::Unavailable)));
    }

    #[test]
    fn test_file_storage_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        let storage = FileStorage::open(&path);
        storage.set_item("revista_article_x", "{}").unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path);
        assert_eq!(
            reopened.get_item("revista_article_x").unwrap().as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn test_file_storage_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, b"{ this is not json ").unwrap();

        let storage = FileStorage::open(&path);
        assert!(storage.keys().unwrap().is_empty());

        // And it recovers on the next write
        storage.set_item("a", "1").unwrap();
        assert_eq!(FileStorage::open(&path).get_item("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_file_storage_failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail
        let path = dir.path().join("cache.json");
        std::fs::create_dir_all(path.join("blocker")).unwrap();

        let storage = FileStorage::open(&path);
        assert!(storage.set_item("a", "1").is_err());
        assert_eq!(storage.get_item("a").unwrap(), None);
    }

    #[test]
    fn test_file_storage_failed_remove_keeps_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        let storage = FileStorage::open(&path);
        storage.set_item("a", "1").unwrap();

        // A directory in place of the temp file makes the next persist fail
        std::fs::create_dir_all(dir.path().join("cache.tmp")).unwrap();

        assert!(storage.remove_item("a").is_err());
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));
        assert_eq!(FileStorage::open(&path).get_item("a").unwrap().as_deref(), Some("1"));
    }
}
