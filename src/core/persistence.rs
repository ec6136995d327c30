use crate::core::{KeyValueStore, PriceOverrides};
use crate::utils::error::{MenuError, Result};

pub const DEFAULT_STORAGE_KEY: &str = "pizza-menu.price-overrides";

/// JSON object of objects: `{"1": {"2": "9.00"}}`. Prices are written as
/// strings so two-decimal values come back exactly.
pub struct SnapshotCodec;

impl SnapshotCodec {
    pub fn encode(overrides: &PriceOverrides) -> Result<String> {
        Ok(serde_json::to_string(overrides)?)
    }

    pub fn decode(raw: &str) -> Result<PriceOverrides> {
        serde_json::from_str(raw).map_err(|e| MenuError::MalformedPersistedData {
            message: e.to_string(),
        })
    }
}

/// Reads the snapshot stored under `key`. A missing key, an unreadable store
/// or a malformed value all yield an empty snapshot.
pub fn load_snapshot<S: KeyValueStore>(store: &S, key: &str) -> PriceOverrides {
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("No saved prices under '{}'", key);
            return PriceOverrides::new();
        }
        Err(e) => {
            tracing::warn!("Could not read saved prices under '{}': {}", key, e);
            return PriceOverrides::new();
        }
    };

    match SnapshotCodec::decode(&raw) {
        Ok(overrides) => {
            tracing::debug!("Restored prices for {} item(s)", overrides.len());
            overrides
        }
        Err(e) => {
            tracing::warn!("{}; starting with default prices", e);
            PriceOverrides::new()
        }
    }
}

pub fn save_snapshot<S: KeyValueStore>(
    store: &S,
    key: &str,
    overrides: &PriceOverrides,
) -> Result<()> {
    let write_failure = |message: String| MenuError::PersistenceWriteFailure {
        key: key.to_string(),
        message,
    };

    let encoded = SnapshotCodec::encode(overrides).map_err(|e| write_failure(e.to_string()))?;
    store
        .set_item(key, &encoded)
        .map_err(|e| write_failure(e.to_string()))?;

    tracing::debug!("Saved {} bytes of prices under '{}'", encoded.len(), key);
    Ok(())
}
