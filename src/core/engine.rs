use crate::core::persistence::{load_snapshot, save_snapshot};
use crate::core::state::MenuState;
use crate::core::{Catalog, ItemId, KeyValueStore, SizeId};
use crate::utils::error::Result;
use rust_decimal::Decimal;
use std::sync::Arc;

/// What the presentation layer asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ToggleExpanded(ItemId),
    ToggleSizeActive(ItemId, SizeId),
    SetPrice(ItemId, SizeId, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistStatus {
    /// Prices did not change, nothing was written.
    Unchanged,
    Saved,
    /// The in-memory state moved on anyway.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub persist: PersistStatus,
}

impl DispatchOutcome {
    pub fn has_warning(&self) -> bool {
        matches!(self.persist, PersistStatus::Failed(_))
    }
}

/// Owns the one mutable `MenuState` and keeps the saved snapshot in step with it.
pub struct MenuEngine<S: KeyValueStore> {
    catalog: Arc<Catalog>,
    store: S,
    key: String,
    state: MenuState,
}

impl<S: KeyValueStore> MenuEngine<S> {
    pub fn open(catalog: Arc<Catalog>, store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let restored = load_snapshot(&store, &key);
        let state = MenuState::initialize(Arc::clone(&catalog), restored);
        tracing::info!(
            "Menu ready: {} item(s), {} size(s), storage key '{}'",
            catalog.items().len(),
            catalog.sizes().len(),
            key
        );

        Self {
            catalog,
            store,
            key,
            state,
        }
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn effective_price(&self, item_id: ItemId, size_id: SizeId) -> Decimal {
        self.state.effective_price(item_id, size_id)
    }

    /// Applies one intent. A rejected intent returns its error and changes nothing.
    pub fn dispatch(&mut self, intent: Intent) -> Result<DispatchOutcome> {
        tracing::debug!("Dispatching {:?}", intent);

        let next = match &intent {
            Intent::ToggleExpanded(item_id) => self.state.toggle_expanded(*item_id),
            Intent::ToggleSizeActive(item_id, size_id) => {
                self.state.toggle_size_active(*item_id, *size_id)
            }
            Intent::SetPrice(item_id, size_id, raw) => {
                self.state.set_price(*item_id, *size_id, raw)
            }
        };

        let next = next.inspect_err(|e| tracing::info!("Rejected {:?}: {}", intent, e))?;
        Ok(self.commit(next))
    }

    /// Throws away in-memory state and rebuilds it from storage.
    pub fn reload(&mut self) {
        let restored = load_snapshot(&self.store, &self.key);
        self.state = MenuState::initialize(Arc::clone(&self.catalog), restored);
    }

    /// Forgets every custom price, in memory and in storage.
    pub fn reset(&mut self) -> DispatchOutcome {
        self.state = self.state.without_overrides();
        let persist = match self.store.remove_item(&self.key) {
            Ok(()) => PersistStatus::Saved,
            Err(e) => {
                tracing::warn!("Could not clear saved prices: {}", e);
                PersistStatus::Failed(e.to_string())
            }
        };
        DispatchOutcome { persist }
    }

    fn commit(&mut self, next: MenuState) -> DispatchOutcome {
        let prices_changed = next.overrides() != self.state.overrides();
        self.state = next;

        if !prices_changed {
            return DispatchOutcome {
                persist: PersistStatus::Unchanged,
            };
        }

        let persist = match save_snapshot(&self.store, &self.key, self.state.overrides()) {
            Ok(()) => PersistStatus::Saved,
            Err(e) => {
                tracing::warn!("{}", e);
                PersistStatus::Failed(e.to_string())
            }
        };
        DispatchOutcome { persist }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;
    use crate::core::persistence::DEFAULT_STORAGE_KEY;
    use crate::domain::model::{DefaultPrice, Item, Size};
    use crate::utils::error::MenuError;

    fn catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(
                vec![Item {
                    item_id: ItemId(1),
                    name: "Margherita".to_string(),
                }],
                vec![
                    Size {
                        size_id: SizeId(1),
                        name: "Small".to_string(),
                    },
                    Size {
                        size_id: SizeId(2),
                        name: "Large".to_string(),
                    },
                ],
                vec![
                    DefaultPrice {
                        item_id: ItemId(1),
                        size_id: SizeId(1),
                        price: Decimal::new(800, 2),
                    },
                    DefaultPrice {
                        item_id: ItemId(1),
                        size_id: SizeId(2),
                        price: Decimal::new(1200, 2),
                    },
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_expanding_does_not_write() {
        let store = MemoryStorage::new();
        let mut engine = MenuEngine::open(catalog(), store.clone(), DEFAULT_STORAGE_KEY);

        let outcome = engine.dispatch(Intent::ToggleExpanded(ItemId(1))).unwrap();

        assert_eq!(outcome.persist, PersistStatus::Unchanged);
        assert!(store.is_empty());
        assert_eq!(engine.state().expanded_item(), Some(ItemId(1)));
    }

    #[test]
    fn test_set_price_is_saved() {
        let store = MemoryStorage::new();
        let mut engine = MenuEngine::open(catalog(), store.clone(), DEFAULT_STORAGE_KEY);

        let outcome = engine
            .dispatch(Intent::SetPrice(ItemId(1), SizeId(1), "7.50".to_string()))
            .unwrap();

        assert_eq!(outcome.persist, PersistStatus::Saved);
        assert_eq!(
            store.get_item(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some(r#"{"1":{"1":"7.50"}}"#)
        );
    }

    #[test]
    fn test_rejected_intent_changes_nothing() {
        let store = MemoryStorage::new();
        let mut engine = MenuEngine::open(catalog(), store.clone(), DEFAULT_STORAGE_KEY);
        let before = engine.state().clone();

        let result = engine.dispatch(Intent::SetPrice(ItemId(1), SizeId(1), "abc".to_string()));

        assert!(matches!(result, Err(MenuError::InvalidPriceInput { .. })));
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.effective_price(ItemId(1), SizeId(1)), Decimal::new(800, 2));
        assert!(store.is_empty());
    }

    #[test]
    fn test_write_failure_is_a_warning() {
        let store = MemoryStorage::with_quota(8);
        let mut engine = MenuEngine::open(catalog(), store, DEFAULT_STORAGE_KEY);

        let outcome = engine
            .dispatch(Intent::SetPrice(ItemId(1), SizeId(2), "13.00".to_string()))
            .unwrap();

        assert!(outcome.has_warning());
        assert_eq!(engine.effective_price(ItemId(1), SizeId(2)), Decimal::new(1300, 2));
    }

    #[test]
    fn test_reload_restores_saved_prices_and_default_selection() {
        let store = MemoryStorage::new();
        let mut engine = MenuEngine::open(catalog(), store, DEFAULT_STORAGE_KEY);

        engine
            .dispatch(Intent::ToggleSizeActive(ItemId(1), SizeId(2)))
            .unwrap();
        engine
            .dispatch(Intent::SetPrice(ItemId(1), SizeId(1), "9.00".to_string()))
            .unwrap();
        engine.dispatch(Intent::ToggleExpanded(ItemId(1))).unwrap();
        assert_eq!(engine.effective_price(ItemId(1), SizeId(2)), Decimal::ZERO);

        engine.reload();

        assert_eq!(engine.effective_price(ItemId(1), SizeId(1)), Decimal::new(900, 2));
        assert!(engine.state().is_active(ItemId(1), SizeId(2)));
        assert_eq!(engine.effective_price(ItemId(1), SizeId(2)), Decimal::new(1200, 2));
        assert_eq!(engine.state().expanded_item(), None);
    }

    #[test]
    fn test_reset_clears_storage() {
        let store = MemoryStorage::new();
        let mut engine = MenuEngine::open(catalog(), store.clone(), DEFAULT_STORAGE_KEY);
        engine
            .dispatch(Intent::SetPrice(ItemId(1), SizeId(1), "5".to_string()))
            .unwrap();

        let outcome = engine.reset();

        assert_eq!(outcome.persist, PersistStatus::Saved);
        assert!(store.is_empty());
        assert_eq!(engine.effective_price(ItemId(1), SizeId(1)), Decimal::new(800, 2));
    }
}
