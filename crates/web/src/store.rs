//! Persistent snapshot store.
//!
//! Durable key-value storage for the session identity and the favorites
//! collection. Each logical key maps to one pretty-printed JSON file in the
//! data directory, and every save fully overwrites the previous value for
//! that key - there is no partial merge and no migration path.
//!
//! `load` never fails from the caller's perspective: a missing key and a
//! corrupt or non-conforming value both come back as `None` (the latter with
//! a warning), so callers start from an empty state instead of crashing on
//! bad persisted data.

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Stable storage keys.
pub mod keys {
    /// Key for the persisted session identity.
    pub const SESSION: &str = "session";

    /// Key for the persisted favorites collection.
    pub const FAVORITES: &str = "favorites";
}

/// Errors that can occur when writing a snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed snapshot store.
///
/// Cloning is cheap; clones share the same directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Load the snapshot stored under `key`.
    ///
    /// Returns `None` if the key has never been written, and also when the
    /// stored value is unreadable or fails to deserialize - in that case the
    /// bad value is logged and treated as absent.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read snapshot, treating as absent");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Corrupt snapshot, treating as absent");
                None
            }
        }
    }

    /// Save a snapshot under `key`, fully overwriting any previous value.
    ///
    /// The snapshot is written to a temporary file first and renamed into
    /// place, so a crash mid-write leaves the previous value intact.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the filesystem write fails.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(value)?;

        let path = self.key_path(key);
        let tmp = self.dir.join(format!(".{key}.tmp"));
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;

        Ok(())
    }

    /// Remove the snapshot stored under `key`. Idempotent.
    pub fn remove(&self, key: &str) {
        let path = self.key_path(key);
        if let Err(e) = std::fs::remove_file(&path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(key, error = %e, "Failed to remove snapshot");
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Snapshot {
        name: String,
        count: u32,
    }

    fn open_temp() -> (tempfile::TempDir, SnapshotStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_load_missing_key_is_none() {
        let (_dir, store) = open_temp();
        assert_eq!(store.load::<Snapshot>("nope"), None);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (_dir, store) = open_temp();
        let value = Snapshot {
            name: "pasta".to_string(),
            count: 3,
        };

        store.save("test", &value).unwrap();
        assert_eq!(store.load::<Snapshot>("test"), Some(value));
    }

    #[test]
    fn test_save_overwrites_whole_value() {
        let (_dir, store) = open_temp();
        store
            .save(
                "test",
                &Snapshot {
                    name: "first".to_string(),
                    count: 1,
                },
            )
            .unwrap();
        store
            .save(
                "test",
                &Snapshot {
                    name: "second".to_string(),
                    count: 2,
                },
            )
            .unwrap();

        let loaded = store.load::<Snapshot>("test").unwrap();
        assert_eq!(loaded.name, "second");
        assert_eq!(loaded.count, 2);
    }

    #[test]
    fn test_load_corrupt_value_is_none() {
        let (dir, store) = open_temp();
        std::fs::write(dir.path().join("test.json"), b"{not json at all").unwrap();

        assert_eq!(store.load::<Snapshot>("test"), None);
    }

    #[test]
    fn test_load_wrong_shape_is_none() {
        let (dir, store) = open_temp();
        // Valid JSON, wrong shape: not partially adopted
        std::fs::write(dir.path().join("test.json"), b"[1, 2, 3]").unwrap();

        assert_eq!(store.load::<Snapshot>("test"), None);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, store) = open_temp();
        store
            .save(
                "test",
                &Snapshot {
                    name: "x".to_string(),
                    count: 0,
                },
            )
            .unwrap();

        store.remove("test");
        assert_eq!(store.load::<Snapshot>("test"), None);

        // Removing a missing key is fine
        store.remove("test");
    }

    #[test]
    fn test_snapshot_is_human_readable() {
        let (dir, store) = open_temp();
        store
            .save(
                "test",
                &Snapshot {
                    name: "risotto".to_string(),
                    count: 1,
                },
            )
            .unwrap();

        let text = std::fs::read_to_string(dir.path().join("test.json")).unwrap();
        assert!(text.contains("\"name\": \"risotto\""));
    }
}
