//! # JSON File Store
//!
//! Persists the whole namespace as one flat JSON object:
//!
//! ```json
//! { "note:1": "Grandpa. Genius. Do not trust.", "note:2": "" }
//! ```
//!
//! Every save rewrites the file through a temporary sibling and a rename, so
//! a crash mid-write leaves the previous contents in place.

use super::{KeyValueStore, StoreError};
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

const FILE_NAME: &str = "notes.json";

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store in the platform data directory (e.g. `~/.local/share/catalog-browser/notes.json`).
    ///
    /// Returns `None` when no home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "catalog", "catalog-browser")
            .map(|dirs| dirs.data_dir().join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| self.io(source))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| self.io(source))?;
            }
        }
        let content = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|source| self.io(source))?;
        fs::rename(&tmp, &self.path).map_err(|source| self.io(source))?;
        Ok(())
    }

    fn io(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)?;
        debug!(path = %self.path.display(), entries = entries.len(), "Wrote note store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_empty() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("notes.json"));
        assert_eq!(store.load("note:1").unwrap(), None);
    }

    #[test]
    fn test_persists_across_instances() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("notes.json");

        JsonFileStore::new(&path).save("note:1", "hello").unwrap();
        JsonFileStore::new(&path).save("note:2", "world").unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load("note:1").unwrap().as_deref(), Some("hello"));
        assert_eq!(reopened.load("note:2").unwrap().as_deref(), Some("world"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::new(&path).load("note:1").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
