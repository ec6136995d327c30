use crate::utils::error::Result;

/// String key-value store with the shape of browser `localStorage`.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key has never been written.
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}
