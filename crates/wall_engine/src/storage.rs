use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use wall_logging::{wall_info, wall_warn};

use crate::persist::{atomic_write, PersistError};

const PROBE_KEY: &str = "__wall_storage_probe__";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read storage file: {0}")]
    Read(#[source] io::Error),
    #[error("storage file is corrupt: {0}")]
    Corrupt(String),
    #[error("failed to serialize storage: {0}")]
    Serialize(String),
    #[error("failed to write storage file: {0}")]
    Write(#[from] PersistError),
    #[error("storage read back a different value than written")]
    ProbeMismatch,
}

/// String key-value storage with the shape of browser local storage.
pub trait KeyValueStorage: Send {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Session-only storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// All keys live in one RON map file, rewritten atomically on every change.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(StorageError::Read(err)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        ron::from_str(&content).map_err(|err| StorageError::Corrupt(err.to_string()))
    }

    // A corrupt file is replaced rather than blocking every future write.
    fn read_for_update(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_all() {
            Err(StorageError::Corrupt(reason)) => {
                wall_warn!("Discarding corrupt storage {:?}: {}", self.path, reason);
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(items, pretty)
            .map_err(|err| StorageError::Serialize(err.to_string()))?;
        atomic_write(&self.path, &content)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.read_for_update()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut items = self.read_for_update()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

/// Returns file storage at `path` if it round-trips a probe value, else session-only memory storage.
pub fn storage_factory(path: &Path) -> Box<dyn KeyValueStorage> {
    let mut file = FileStorage::new(path);
    match probe(&mut file) {
        Ok(()) => {
            wall_info!("Using storage file {:?}", file.path());
            Box::new(file)
        }
        Err(err) => {
            wall_warn!(
                "Storage file {:?} unusable ({}); preferences last for this session only",
                path,
                err
            );
            Box::new(MemoryStorage::default())
        }
    }
}

fn probe(storage: &mut dyn KeyValueStorage) -> Result<(), StorageError> {
    storage.set_item(PROBE_KEY, PROBE_KEY)?;
    if storage.get_item(PROBE_KEY)?.as_deref() != Some(PROBE_KEY) {
        return Err(StorageError::ProbeMismatch);
    }
    storage.remove_item(PROBE_KEY)
}
