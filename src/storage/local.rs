//! Keyed JSON blob, the storefront's client-local persistence.
//!
//! The whole blob is one JSON object (`{"savedUser": ..., "userOrders": [...]}`). Every
//! call loads it, changes one key and writes it back while holding the handle's lock,
//! so two writers sharing a handle never lose each other's update.

use super::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Where the blob lives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StorageLocation {
    /// Lost when the process exits.
    #[default]
    Memory,
    /// A JSON file, created on first write.
    File(PathBuf),
}

enum Medium {
    Memory(Map<String, Value>),
    File(PathBuf),
}

impl Medium {
    fn load(&self) -> Result<Map<String, Value>, StorageError> {
        match self {
            Medium::Memory(map) => Ok(map.clone()),
            Medium::File(path) => read_file(path),
        }
    }

    fn store(&mut self, blob: Map<String, Value>) -> Result<(), StorageError> {
        match self {
            Medium::Memory(map) => {
                *map = blob;
                Ok(())
            }
            Medium::File(path) => write_file(path, &blob),
        }
    }
}

/// Cloneable handle to one blob. Clones share the same medium and lock.
#[derive(Clone)]
pub struct LocalStorage {
    medium: Arc<Mutex<Medium>>,
}

impl std::fmt::Debug for LocalStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &*self.lock() {
            Medium::Memory(map) => f.debug_struct("LocalStorage").field("keys", &map.len()).finish(),
            Medium::File(path) => f.debug_struct("LocalStorage").field("path", path).finish(),
        }
    }
}

impl LocalStorage {
    pub fn in_memory() -> Self {
        Self::with_medium(Medium::Memory(Map::new()))
    }

    /// Opens (without creating) a file-backed blob. An existing file must parse.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let keys = read_file(&path)?.len();
        debug!(path = %path.display(), keys, "Opened local storage");
        Ok(Self::with_medium(Medium::File(path)))
    }

    pub fn from_location(location: &StorageLocation) -> Result<Self, StorageError> {
        match location {
            StorageLocation::Memory => Ok(Self::in_memory()),
            StorageLocation::File(path) => Self::open(path.clone()),
        }
    }

    fn with_medium(medium: Medium) -> Self {
        Self {
            medium: Arc::new(Mutex::new(medium)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Medium> {
        self.medium.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Value under `key`, `None` if the key is absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let blob = self.lock().load()?;
        blob.get(key).cloned().map(|v| decode(key, v)).transpose()
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let value = encode(key, value)?;
        let mut medium = self.lock();
        let mut blob = medium.load()?;
        blob.insert(key.to_string(), value);
        medium.store(blob)
    }

    /// Returns whether the key was present.
    pub fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut medium = self.lock();
        let mut blob = medium.load()?;
        if blob.remove(key).is_none() {
            return Ok(false);
        }
        medium.store(blob)?;
        Ok(true)
    }

    /// Read-modify-write of one key under a single lock.
    ///
    /// `edit` sees the current value (or `None`) and may change it; whatever it leaves
    /// behind is written back, and a `None` removes the key.
    pub fn modify<T, R>(
        &self,
        key: &str,
        edit: impl FnOnce(&mut Option<T>) -> R,
    ) -> Result<R, StorageError>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut medium = self.lock();
        let mut blob = medium.load()?;
        let mut value = blob.remove(key).map(|v| decode(key, v)).transpose()?;
        let out = edit(&mut value);
        if let Some(value) = value {
            blob.insert(key.to_string(), encode(key, &value)?);
        }
        medium.store(blob)?;
        Ok(out)
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: Value) -> Result<T, StorageError> {
    serde_json::from_value(value).map_err(|source| StorageError::Json {
        key: key.to_string(),
        source,
    })
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<Value, StorageError> {
    serde_json::to_value(value).map_err(|source| StorageError::Json {
        key: key.to_string(),
        source,
    })
}

fn read_file(path: &Path) -> Result<Map<String, Value>, StorageError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if text.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str(&text) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(StorageError::NotAnObject(path.to_path_buf())),
    }
}

fn write_file(path: &Path, blob: &Map<String, Value>) -> Result<(), StorageError> {
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    let text = serde_json::to_string_pretty(blob).map_err(|source| StorageError::Json {
        key: String::from("*"),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, text).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip_and_remove() {
        let storage = LocalStorage::in_memory();
        storage.set("savedUser", &"ana").unwrap();
        assert_eq!(storage.get::<String>("savedUser").unwrap().as_deref(), Some("ana"));
        assert!(storage.remove("savedUser").unwrap());
        assert!(!storage.remove("savedUser").unwrap());
        assert_eq!(storage.get::<String>("savedUser").unwrap(), None);
    }

    #[test]
    fn clones_share_the_blob() {
        let a = LocalStorage::in_memory();
        let b = a.clone();
        a.set("n", &1u32).unwrap();
        assert_eq!(b.get::<u32>("n").unwrap(), Some(1));
    }

    #[test]
    fn modify_leaves_other_keys_alone() {
        let storage = LocalStorage::in_memory();
        storage.set("savedUser", &"ana").unwrap();
        let len = storage
            .modify::<Vec<u32>, _>("userOrders", |list| {
                let list = list.get_or_insert_with(Vec::new);
                list.push(7);
                list.len()
            })
            .unwrap();
        assert_eq!(len, 1);
        assert_eq!(storage.get::<Vec<u32>>("userOrders").unwrap(), Some(vec![7]));
        assert_eq!(storage.get::<String>("savedUser").unwrap().as_deref(), Some("ana"));
    }

    #[test]
    fn file_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.json");

        LocalStorage::open(&path).unwrap().set("n", &5u32).unwrap();
        let reopened = LocalStorage::open(&path).unwrap();
        assert_eq!(reopened.get::<u32>("n").unwrap(), Some(5));
    }

    #[test]
    fn non_object_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            LocalStorage::open(&path),
            Err(StorageError::NotAnObject(_))
        ));
    }

    #[test]
    fn wrong_type_is_a_json_error() {
        let storage = LocalStorage::in_memory();
        storage.set("n", &"not a number").unwrap();
        assert!(matches!(
            storage.get::<u32>("n"),
            Err(StorageError::Json { .. })
        ));
    }
}
