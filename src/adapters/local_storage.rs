use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed store: each key lives in `<base_path>/<key>.json`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn file_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.file_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let full_path = self.file_for(key);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // write-then-rename, readers only ever see a whole snapshot
        let tmp_path = full_path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &full_path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.file_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_reads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        assert_eq!(storage.get_item("prices").unwrap(), None);
    }

    #[test]
    fn test_set_creates_directories_and_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested").join("store"));

        storage.set_item("prices", r#"{"1":{"1":"9.00"}}"#).unwrap();

        assert!(temp_dir.path().join("nested/store/prices.json").exists());
        assert_eq!(
            storage.get_item("prices").unwrap().as_deref(),
            Some(r#"{"1":{"1":"9.00"}}"#)
        );
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.set_item("prices", "{}").unwrap();
        storage.remove_item("prices").unwrap();
        storage.remove_item("prices").unwrap();

        assert_eq!(storage.get_item("prices").unwrap(), None);
    }
}
