//! # Local storage
//!
//! Favorites, recently opened items, dashboard sets, and the default project are
//! stored as JSON strings in a [`KeyValueStore`], one value per key. Each
//! collection reads the whole value, modifies it, and writes it back.
//!
//! - [`FileStore`] - one `{key}.json` file per key in a directory
//! - [`MemoryStore`] - in-process map, for tests and ephemeral sessions
//!
//! A stored value that fails to parse is deleted and the collection starts empty,
//! so one corrupt file never blocks the application.
//!
//! There is no versioning: when two processes modify the same collection
//! concurrently, the last write wins.

use std::{
    collections::HashMap,
    fmt,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::Mutex;
use serde::{Serialize, de::DeserializeOwned};
use snafu::prelude::*;
use tracing::{debug, warn};

use crate::{
    Result,
    config::{KEY_DASHBOARD_SETS, KEY_DEFAULT_PROJECT, KEY_FAVORITES, KEY_RECENT},
    default_project::DefaultProject,
    error::{ConfigSnafu, IoSnafu, MalformedSnafu, SerializationSnafu, StorageError},
    favorites::Favorites,
    recent::RecentOpens,
    sets::DashboardSets,
};

/// String key-value persistence used by the collections.
///
/// Implementations must be safe to share between threads. Writes of a single key
/// should be atomic: a reader sees either the old or the new value.
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Returns the stored value, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// File-per-key store.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store in `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).context(IoSnafu { path: dir.clone() })?;
        debug!(dir = ?dir, "file store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        ensure!(
            valid,
            ConfigSnafu {
                message: format!("invalid storage key {key:?}"),
            }
        );
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        // write to a sibling temp file, then rename over the target
        let mut file =
            tempfile::NamedTempFile::new_in(&self.dir).context(IoSnafu { path: path.clone() })?;
        file.write_all(value.as_bytes())
            .context(IoSnafu { path: path.clone() })?;
        file.persist(&path).map_err(|e| StorageError::Io {
            path,
            source: e.error,
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

/// In-memory store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().remove(key);
        Ok(())
    }
}

/// Storage keys for each collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub dashboard_sets: String,
    pub favorites: String,
    pub recent: String,
    pub default_project: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            dashboard_sets: KEY_DASHBOARD_SETS.to_string(),
            favorites: KEY_FAVORITES.to_string(),
            recent: KEY_RECENT.to_string(),
            default_project: KEY_DEFAULT_PROJECT.to_string(),
        }
    }
}

impl StorageKeys {
    /// Default keys prefixed with `{namespace}.`, to keep separate profiles
    /// (for example, one per Lightdash instance) in one store.
    pub fn with_namespace(namespace: &str) -> Self {
        let keys = Self::default();
        if namespace.is_empty() {
            return keys;
        }
        let prefixed = |key: String| format!("{namespace}.{key}");
        Self {
            dashboard_sets: prefixed(keys.dashboard_sets),
            favorites: prefixed(keys.favorites),
            recent: prefixed(keys.recent),
            default_project: prefixed(keys.default_project),
        }
    }
}

/// Reads and parses `key`. Absent keys yield `T::default()`; unparseable values
/// yield `StorageError::Malformed`.
pub(crate) fn try_load<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    match store.get(key)? {
        None => Ok(T::default()),
        Some(raw) => serde_json::from_str(&raw).context(MalformedSnafu { key }),
    }
}

/// Like [`try_load`], but a malformed value is deleted and `T::default()` returned.
pub(crate) fn load<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    match try_load(store, key) {
        Err(StorageError::Malformed { key, source }) => {
            warn!(%key, error = %source, "discarding malformed stored value");
            store.remove(&key)?;
            Ok(T::default())
        }
        other => other,
    }
}

pub(crate) fn save<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value).context(SerializationSnafu)?;
    store.set(key, &raw)?;
    Ok(())
}

/// Entry point to the local collections.
///
/// Cheap to clone; all clones share the same store.
#[derive(Debug, Clone)]
pub struct Collections {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl Collections {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// Collections backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), StorageKeys::default())
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn sets(&self) -> DashboardSets {
        DashboardSets::new(self.store.clone(), self.keys.dashboard_sets.clone())
    }

    pub fn favorites(&self) -> Favorites {
        Favorites::new(self.store.clone(), self.keys.favorites.clone())
    }

    pub fn recent(&self) -> RecentOpens {
        RecentOpens::new(self.store.clone(), self.keys.recent.clone())
    }

    pub fn default_project(&self) -> DefaultProject {
        DefaultProject::new(self.store.clone(), self.keys.default_project.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() -> Result<(), StorageError> {
        let store = MemoryStore::new();
        assert_eq!(store.get("k")?, None);
        store.set("k", "v1")?;
        store.set("k", "v2")?;
        assert_eq!(store.get("k")?.as_deref(), Some("v2"));
        store.remove("k")?;
        store.remove("k")?;
        assert_eq!(store.get("k")?, None);
        Ok(())
    }

    #[test]
    fn test_namespaced_keys() {
        let keys = StorageKeys::with_namespace("work");
        assert_eq!(keys.dashboard_sets, "work.dashboardSets");
        assert_eq!(keys.recent, "work.recentlyOpened");
        assert_eq!(StorageKeys::with_namespace(""), StorageKeys::default());
    }

    #[test]
    fn test_load_absent_is_default() -> Result<(), StorageError> {
        let store = MemoryStore::new();
        let ids: Vec<String> = load(&store, "favorites")?;
        assert!(ids.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_value_is_reported_then_cleared() -> Result<(), StorageError> {
        let store = MemoryStore::new();
        store.set("favorites", "{not json")?;

        let err = try_load::<Vec<String>>(&store, "favorites").unwrap_err();
        assert!(matches!(err, StorageError::Malformed { .. }));
        // try_load leaves the value in place
        assert!(store.get("favorites")?.is_some());

        let ids: Vec<String> = load(&store, "favorites")?;
        assert!(ids.is_empty());
        assert_eq!(store.get("favorites")?, None);
        Ok(())
    }

    #[test]
    fn test_wrong_shape_is_malformed() -> Result<(), StorageError> {
        let store = MemoryStore::new();
        store.set("favorites", r#"{"a": 1}"#)?;
        let ids: Vec<String> = load(&store, "favorites")?;
        assert!(ids.is_empty());
        assert_eq!(store.get("favorites")?, None);
        Ok(())
    }

    #[test]
    fn test_file_store_rejects_path_keys() -> Result<(), StorageError> {
        let dir = tempfile::tempdir().context(IoSnafu { path: "tmp" })?;
        let store = FileStore::new(dir.path())?;
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::Config { .. })
        ));
        assert!(matches!(store.get(""), Err(StorageError::Config { .. })));
        store.set("work.favorites", "[]")?;
        assert!(dir.path().join("work.favorites.json").exists());
        Ok(())
    }
}
