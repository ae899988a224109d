//! Key-value storage providers backing the local store.

#[cfg(test)]
use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::{Mutex, PoisonError};

use tempfile::NamedTempFile;

use crate::errors::AppError;

/// Narrow key-value interface the local store is written against.
pub trait StorageProvider: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError>;
    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), AppError>;
    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// One file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) the storage directory.
    pub fn open(dir: &Path) -> Result<Self, AppError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageProvider for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), AppError> {
        // Write to a sibling temp file and rename so readers never see a partial
        // value. The temp file is removed on drop if the rename fails.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value)?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process storage for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl StorageProvider for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), AppError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(storage: &dyn StorageProvider) {
        assert_eq!(storage.get("missing").unwrap(), None);

        storage.set("key", b"one").unwrap();
        assert_eq!(storage.get("key").unwrap().as_deref(), Some(&b"one"[..]));

        storage.set("key", b"two").unwrap();
        assert_eq!(storage.get("key").unwrap().as_deref(), Some(&b"two"[..]));

        storage.remove("key").unwrap();
        assert_eq!(storage.get("key").unwrap(), None);
        storage.remove("key").unwrap();
    }

    #[test]
    fn test_memory_storage() {
        exercise(&MemoryStorage::new());
    }

    #[test]
    fn test_file_storage() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(&dir.path().join("nested")).unwrap();
        exercise(&storage);
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = TempDir::new().unwrap();
        FileStorage::open(dir.path())
            .unwrap()
            .set("portfolio_settings", b"{}")
            .unwrap();

        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("portfolio_settings").unwrap().as_deref(),
            Some(&b"{}"[..])
        );
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_file_storage_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set("portfolio_projects", b"[]").unwrap();
        storage.set("portfolio_projects", b"[1]").unwrap();

        assert_eq!(entries(dir.path()), vec!["portfolio_projects.json"]);
    }

    #[test]
    fn test_file_storage_failed_write_cleans_up() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        // A directory in the way makes the final rename fail.
        let blocker = dir.path().join("portfolio_settings.json");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), b"x").unwrap();

        let result = storage.set("portfolio_settings", b"{}");
        assert!(matches!(result, Err(AppError::Storage(_))));
        assert_eq!(entries(dir.path()), vec!["portfolio_settings.json"]);
    }
}
