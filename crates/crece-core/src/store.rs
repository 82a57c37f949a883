//! Key-value persistence backends.
//!
//! The engine only ever needs opaque string get/set, so any store that can
//! hold a flat string map works. `FileStore` keeps the whole map in a single
//! pretty-printed JSON file; `MemoryStore` backs tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Opaque string key-value store.
///
/// `set_many` exists so composite operations (e.g. purchase = debit + unlock)
/// land in one snapshot write instead of two independent ones.
pub trait KvStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn set_many(&mut self, entries: &[(String, String)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Thread-safe shared store handle. The ledger and the account registry
/// share one store; every read-modify-write happens under this lock.
pub type SharedStore = Arc<Mutex<Box<dyn KvStore>>>;

pub fn shared(store: impl KvStore + 'static) -> SharedStore {
    Arc::new(Mutex::new(Box::new(store)))
}

/// On-disk snapshot wrapper.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    saved_at: DateTime<Utc>,
    entries: BTreeMap<String, String>,
}

/// JSON-file-backed store.
///
/// Writes go to disk first; the in-memory map is only updated once the write
/// succeeded, so memory never claims state the file does not have.
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, loading an existing snapshot if present.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            match serde_json::from_str::<Snapshot>(&contents) {
                Ok(snapshot) => snapshot.entries,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable store snapshot: {}", e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let snapshot = Snapshot {
            saved_at: Utc::now(),
            entries: entries.clone(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&self.path, json)
            .map_err(|e| EngineError::Persistence(format!("write {}: {}", self.path.display(), e)))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }

    fn set_many(&mut self, pairs: &[(String, String)]) -> Result<()> {
        let mut next = self.entries.clone();
        for (key, value) in pairs {
            next.insert(key.clone(), value.clone());
        }
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("user_coins").unwrap(), None);
        store.set("user_coins", "150").unwrap();
        assert_eq!(store.get("user_coins").unwrap(), Some("150".to_string()));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("high_score_easy_Computer_Science", "80").unwrap();
        store
            .set_many(&[
                ("user_coins".to_string(), "200".to_string()),
                ("easy_chest_unlocked".to_string(), "true".to_string()),
            ])
            .unwrap();
        drop(store);

        let store = FileStore::open(&path).unwrap();
        assert_eq!(
            store.get("high_score_easy_Computer_Science").unwrap(),
            Some("80".to_string())
        );
        assert_eq!(store.get("user_coins").unwrap(), Some("200".to_string()));
        assert_eq!(
            store.get("easy_chest_unlocked").unwrap(),
            Some("true".to_string())
        );
    }

    #[test]
    fn test_file_store_ignores_corrupt_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("user_coins").unwrap(), None);
    }
}
