//! Snapshot store: the only read/write path for the persisted snapshot
//!
//! - Storage backend trait (`get` / `set` by key)
//! - In-memory and file-system backends
//! - Load / update / save with failure tolerance

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use crate::error::StorageError;
use crate::snapshot::WalletSnapshot;

/// Storage key of the wallet snapshot
pub const STORAGE_KEY: &str = "portfolio-wallets";

/// Durable key/value storage used by the snapshot store
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local storage, lost on exit
#[derive(Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self
            .values
            .read()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self
            .values
            .write()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key under a base directory
#[derive(Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create storage under `base_path` (created on first write)
    pub fn new_with_base_dir(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)?;
        let path = self.key_path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// Owner of the canonical [`WalletSnapshot`]
///
/// Reads never fail (an unreadable payload is an empty snapshot) and write
/// failures are logged and dropped: losing persistence leaves the caller's
/// in-memory state usable.
#[derive(Clone)]
pub struct SnapshotStore {
    backend: Arc<dyn StorageBackend>,
    write_lock: Arc<Mutex<()>>,
}

impl SnapshotStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn on_disk(base_path: PathBuf) -> Self {
        Self::new(Arc::new(FileStorage::new_with_base_dir(base_path)))
    }

    /// Current snapshot, empty if storage is empty, unavailable or corrupt
    pub fn load(&self) -> WalletSnapshot {
        let raw = match self.backend.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return WalletSnapshot::default(),
            Err(e) => {
                log::warn!("Wallet snapshot unreadable, starting empty: {}", e);
                return WalletSnapshot::default();
            }
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => WalletSnapshot::from_value(&value),
            Err(e) => {
                log::warn!("Wallet snapshot is not valid JSON, starting empty: {}", e);
                WalletSnapshot::default()
            }
        }
    }

    /// Replace every chain list present in `patch` and persist the result
    ///
    /// The patch is not merged per entry; callers upsert/remove first.
    pub fn update(&self, patch: &WalletSnapshot) -> WalletSnapshot {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut next = self.load();
        next.apply(patch);
        self.write(&next);
        next
    }

    /// Overwrite the stored snapshot
    pub fn save(&self, snapshot: &WalletSnapshot) {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.write(snapshot);
    }

    fn write(&self, snapshot: &WalletSnapshot) {
        let payload = match snapshot.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("Failed to serialize wallet snapshot: {}", e);
                return;
            }
        };

        if let Err(e) = self.backend.set(STORAGE_KEY, &payload) {
            log::warn!("Failed to persist wallet snapshot: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.get("k").unwrap().is_none());
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_empty_store_loads_empty_snapshot() {
        let store = SnapshotStore::in_memory();
        assert!(store.load().is_empty());
    }
}
