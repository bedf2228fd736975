use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Persistent string key-value store backing the session.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removing a key that is not present is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Stores each key as a file inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.path(key);
        std::fs::write(&path, value).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

/// In-process storage, for tests and embedders that persist elsewhere
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_set_get_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(tmp.path().join("nested"));

        assert_eq!(storage.get("fp_token").unwrap(), None);
        storage.set("fp_token", "t1").unwrap();
        assert_eq!(storage.get("fp_token").unwrap().as_deref(), Some("t1"));

        storage.remove("fp_token").unwrap();
        assert_eq!(storage.get("fp_token").unwrap(), None);
        // Second remove is a no-op
        storage.remove("fp_token").unwrap();
    }

    #[test]
    fn test_file_storage_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(tmp.path());
        storage.set("fp_user", r#"{"id":1}"#).unwrap();
        storage.set("fp_user", r#"{"id":2}"#).unwrap();
        assert_eq!(storage.get("fp_user").unwrap().as_deref(), Some(r#"{"id":2}"#));
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        FileStorage::new(tmp.path()).set("fp_token", "t1").unwrap();
        let reopened = FileStorage::new(tmp.path());
        assert_eq!(reopened.get("fp_token").unwrap().as_deref(), Some("t1"));
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert!(storage.is_empty());
        storage.set("fp_token", "t1").unwrap();
        assert_eq!(storage.get("fp_token").unwrap().as_deref(), Some("t1"));
        storage.remove("fp_token").unwrap();
        storage.remove("fp_token").unwrap();
        assert!(storage.is_empty());
    }
}
