use super::files::{atomic_write, backup_file, read_file};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Durable string slots, addressed by key
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// All keys kept in a single JSON object file, rewritten atomically on every `set`
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileKvStore {
    /// Open the store. An unreadable file is backed up and replaced by an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = read_file(&path)?;

        let entries = if content.trim().is_empty() {
            BTreeMap::new()
        } else {
            match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(err) => {
                    let backup = backup_file(&path)?;
                    log::warn!(
                        "event=storage_unreadable path={} backup={} error={}",
                        path.display(),
                        backup.display(),
                        err
                    );
                    BTreeMap::new()
                }
            }
        };

        Ok(Self { path, entries })
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&next)?;
        atomic_write(&self.path, &json)
            .with_context(|| format!("Failed to write key `{}`", key))?;

        self.entries = next;
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-memory store for tests and throwaway sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
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
    use std::fs;

    #[test]
    fn test_file_store_persists_across_open() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("storage.json");

        let mut store = FileKvStore::open(&path).unwrap();
        assert_eq!(store.get("filterOption").unwrap(), None);
        store.set("filterOption", "completed").unwrap();

        let reopened = FileKvStore::open(&path).unwrap();
        assert_eq!(reopened.get("filterOption").unwrap(), Some("completed".to_string()));
    }

    #[test]
    fn test_file_store_recovers_from_corrupt_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileKvStore::open(&path).unwrap();
        assert_eq!(store.get("tasks").unwrap(), None);

        let backups = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".bak."))
            .count();
        assert_eq!(backups, 1);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryKvStore::new();
        store.set("tasks", "[]").unwrap();
        assert_eq!(store.get("tasks").unwrap(), Some("[]".to_string()));
        assert_eq!(store.get("missing").unwrap(), None);
    }
}
