use crate::domain::ports::KeyValueStore;
use crate::utils::error::{MenuError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// In-process store. Clones share the same entries.
///
/// With a quota, a write that would push the total size of keys and values
/// past it is refused, the way a browser refuses `localStorage.setItem`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|_| MenuError::PersistenceWriteFailure {
            key: String::new(),
            message: "memory storage lock poisoned".to_string(),
        })
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.lock()?;

        if let Some(quota) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > quota {
                return Err(MenuError::PersistenceWriteFailure {
                    key: key.to_string(),
                    message: format!("quota of {} bytes exceeded", quota),
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.set_item("a", "1").unwrap();

        assert_eq!(handle.get_item("a").unwrap().as_deref(), Some("1"));
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn test_quota_rejects_oversized_write_and_keeps_old_value() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "12345").unwrap();

        let result = storage.set_item("k", "0123456789");

        assert!(result.is_err());
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("12345"));
    }

    #[test]
    fn test_len_still_counts_after_poisoned_lock() {
        let storage = MemoryStorage::new();
        storage.set_item("k", "v").unwrap();

        let entries = Arc::clone(&storage.entries);
        let _ = std::thread::spawn(move || {
            let _guard = entries.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(storage.entries.is_poisoned());
        assert_eq!(storage.len(), 1);
        assert!(!storage.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let storage = MemoryStorage::new();
        storage.set_item("k", "v").unwrap();
        storage.remove_item("k").unwrap();
        assert!(storage.is_empty());
    }
}
