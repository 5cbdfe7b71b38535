//! Persisted key-value cache storage
//!
//! Values are serialized JSON arrays keyed per identity, e.g.
//! `cart:guest` or `order-cache:u1`. The storage is best-effort: a
//! missing key means first run, a corrupted value falls back to empty at
//! the call site, and a rejected write degrades the session to
//! memory-only operation. None of these conditions crash the client.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use shared::Identity;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Write rejected: {0}")]
    Rejected(String),
}

// ============================================================================
// Storage keys
// ============================================================================

/// Storage key for the identity's cart snapshot
pub fn cart_key(identity: &Identity) -> String {
    format!("cart:{}", identity.storage_key())
}

/// Storage key for the identity's order cache
pub fn order_cache_key(identity: &Identity) -> String {
    format!("order-cache:{}", identity.storage_key())
}

// ============================================================================
// CacheStorage trait
// ============================================================================

/// Key-value storage for serialized cache snapshots
pub trait CacheStorage: Send + Sync {
    /// Load the value under `key`; `None` means the key was never written
    fn load(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Save the value under `key`
    fn save(&self, key: &str, value: &Value) -> Result<(), StorageError>;

    /// Remove the key; no-op if absent
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Load and deserialize a typed value
pub fn load_typed<T: DeserializeOwned>(
    storage: &dyn CacheStorage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.load(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize and save a typed value
pub fn save_typed<T: Serialize>(
    storage: &dyn CacheStorage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    storage.save(key, &serde_json::to_value(value)?)
}

// ============================================================================
// FileStorage - JSON file per key
// ============================================================================

/// File-backed storage, one JSON file per key under a base directory
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    /// Create a new file storage rooted at `base`
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys contain ':' separators; flatten them for the filesystem
        self.base.join(format!("{}.json", key.replace(':', "_")))
    }
}

impl CacheStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.base)?;

        let path = self.key_path(key);
        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.key_path(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStorage").field("base", &self.base).finish()
    }
}

// ============================================================================
// MemoryStorage - in-memory backend
// ============================================================================

/// In-memory storage backend
///
/// Used when no durable location is available, and by tests. Writes can
/// be forced to fail to exercise the quota-rejection path.
#[derive(Default)]
pub struct MemoryStorage {
    data: Mutex<HashMap<String, Value>>,
    reject_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail (simulates a full/rejecting store)
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.data.lock().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let data = self
            .data
            .lock()
            .map_err(|_| StorageError::Rejected("storage lock poisoned".into()))?;
        Ok(data.get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Rejected("write rejected".into()));
        }
        let mut data = self
            .data
            .lock()
            .map_err(|_| StorageError::Rejected("storage lock poisoned".into()))?;
        data.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut data = self
            .data
            .lock()
            .map_err(|_| StorageError::Rejected("storage lock poisoned".into()))?;
        data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_identity_scoped() {
        let u1 = Identity::user("u1");
        let u2 = Identity::user("u2");

        assert_eq!(cart_key(&Identity::Guest), "cart:guest");
        assert_eq!(order_cache_key(&u1), "order-cache:u1");
        assert_ne!(order_cache_key(&u1), order_cache_key(&u2));
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        let value = serde_json::json!([{"item_id": "i1", "quantity": 2}]);

        assert!(storage.load("cart:guest").unwrap().is_none());
        storage.save("cart:guest", &value).unwrap();
        assert_eq!(storage.load("cart:guest").unwrap(), Some(value));

        storage.remove("cart:guest").unwrap();
        assert!(storage.load("cart:guest").unwrap().is_none());
    }

    #[test]
    fn test_memory_storage_rejects_writes() {
        let storage = MemoryStorage::new();
        storage.set_reject_writes(true);

        let err = storage.save("cart:guest", &serde_json::json!([])).unwrap_err();
        assert!(matches!(err, StorageError::Rejected(_)));
        assert!(storage.is_empty());
    }
}
