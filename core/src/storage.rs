//! Durable key-value storage and the on-disk form of the workout collection.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::Config;
use crate::error::StorageError;
use crate::models::Workout;
use crate::telemetry::Metrics;

/// Synchronous key-value store. A `set` replaces the whole value or fails.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-process store; contents are lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
///
/// Writes go to a sibling temp file which is then renamed over the target.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.storage_dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Reads the collection stored under `key`.
///
/// `Ok(None)` when nothing is stored. Malformed data is reported as
/// [`StorageError::Unreadable`] with the JSON path of the first bad field.
/// Derived metrics are recomputed and duplicate ids after the first are
/// dropped.
pub fn read_workouts<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<Option<Vec<Workout>>, StorageError> {
    let Some(contents) = store.get(key)? else {
        return Ok(None);
    };

    let mut de = serde_json::Deserializer::from_str(&contents);
    let stored: Option<Vec<Workout>> = serde_path_to_error::deserialize(&mut de).map_err(|e| {
        StorageError::Unreadable {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        }
    })?;
    // `null` is what an emptied browser store hands back
    let Some(stored) = stored else {
        return Ok(None);
    };

    let mut seen = HashSet::with_capacity(stored.len());
    let mut workouts = Vec::with_capacity(stored.len());
    for w in stored {
        if !seen.insert(w.id().to_string()) {
            warn!("dropping stored workout with duplicate id {}", w.id());
            continue;
        }
        workouts.push(w.rehydrate());
    }
    Ok(Some(workouts))
}

/// Like [`read_workouts`], but never fails: absent or unreadable data yields
/// an empty collection. Unreadable data is counted in `metrics`.
pub fn load_workouts<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    metrics: &Metrics,
) -> Vec<Workout> {
    match read_workouts(store, key) {
        Ok(Some(workouts)) => {
            info!("loaded {} workouts from '{}'", workouts.len(), key);
            workouts
        }
        Ok(None) => {
            debug!("no stored workouts under '{}'", key);
            Vec::new()
        }
        Err(e) => {
            metrics.storage_error();
            warn!("ignoring stored workouts under '{}': {}", key, e);
            Vec::new()
        }
    }
}

/// Replaces the collection stored under `key`.
pub fn save_workouts<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    workouts: &[Workout],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(workouts)?;
    store.set(key, &json)?;
    debug!("saved {} workouts to '{}'", workouts.len(), key);
    Ok(())
}
