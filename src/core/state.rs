use crate::domain::model::{ActiveSelection, Catalog, ItemId, PriceOverrides, SizeId};
use crate::utils::error::{MenuError, Result};
use crate::utils::validation::parse_price_input;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Selection and price state of the menu.
///
/// Transitions take `&self` and return a new state, so a caller holding an
/// older value never sees it change. Rejected transitions return an error and
/// leave nothing modified.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuState {
    catalog: Arc<Catalog>,
    active: ActiveSelection,
    overrides: PriceOverrides,
    expanded: Option<ItemId>,
}

impl MenuState {
    /// Every pair with a default price starts active. Restored overrides are
    /// kept only for pairs that are active under that default.
    pub fn initialize(catalog: Arc<Catalog>, restored: PriceOverrides) -> Self {
        let mut active = ActiveSelection::new();
        for (item_id, size_id) in catalog.offered_pairs() {
            active.entry(item_id).or_default().insert(size_id, true);
        }

        let mut overrides = PriceOverrides::new();
        for (item_id, sizes) in restored {
            for (size_id, price) in sizes {
                let offered = catalog.default_price(item_id, size_id).is_some();
                if !offered || (price.is_sign_negative() && !price.is_zero()) {
                    tracing::debug!(
                        "Dropping restored price {} for item {} size {}",
                        price,
                        item_id,
                        size_id
                    );
                    continue;
                }
                overrides.entry(item_id).or_default().insert(size_id, price);
            }
        }

        Self {
            catalog,
            active,
            overrides,
            expanded: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn overrides(&self) -> &PriceOverrides {
        &self.overrides
    }

    pub fn active_selection(&self) -> &ActiveSelection {
        &self.active
    }

    pub fn expanded_item(&self) -> Option<ItemId> {
        self.expanded
    }

    pub fn is_expanded(&self, item_id: ItemId) -> bool {
        self.expanded == Some(item_id)
    }

    pub fn is_active(&self, item_id: ItemId, size_id: SizeId) -> bool {
        self.active
            .get(&item_id)
            .and_then(|sizes| sizes.get(&size_id))
            .copied()
            .unwrap_or(false)
    }

    pub fn price_override(&self, item_id: ItemId, size_id: SizeId) -> Option<Decimal> {
        self.overrides
            .get(&item_id)
            .and_then(|sizes| sizes.get(&size_id))
            .copied()
    }

    /// Override if present, else the default price while active, else zero.
    pub fn effective_price(&self, item_id: ItemId, size_id: SizeId) -> Decimal {
        if let Some(price) = self.price_override(item_id, size_id) {
            return price;
        }
        if self.is_active(item_id, size_id) {
            return self
                .catalog
                .default_price(item_id, size_id)
                .unwrap_or(Decimal::ZERO);
        }
        Decimal::ZERO
    }

    pub fn toggle_expanded(&self, item_id: ItemId) -> Result<Self> {
        self.catalog.check_item(item_id)?;

        let mut next = self.clone();
        next.expanded = if self.expanded == Some(item_id) {
            None
        } else {
            Some(item_id)
        };
        Ok(next)
    }

    /// Flips a size on or off. Switching off drops the override; switching on
    /// reseeds the override from the default price when there is one.
    pub fn toggle_size_active(&self, item_id: ItemId, size_id: SizeId) -> Result<Self> {
        self.catalog.check_pair(item_id, size_id)?;

        let mut next = self.clone();
        let now_active = !self.is_active(item_id, size_id);
        next.active
            .entry(item_id)
            .or_default()
            .insert(size_id, now_active);

        if now_active {
            if let Some(default) = self.catalog.default_price(item_id, size_id) {
                next.overrides
                    .entry(item_id)
                    .or_default()
                    .insert(size_id, default);
            }
        } else {
            next.remove_override(item_id, size_id);
        }

        Ok(next)
    }

    pub fn set_price(&self, item_id: ItemId, size_id: SizeId, raw_input: &str) -> Result<Self> {
        self.catalog.check_pair(item_id, size_id)?;
        let price = parse_price_input(raw_input)?;

        if !self.is_active(item_id, size_id) {
            return Err(MenuError::InactiveSize {
                item_id: item_id.0,
                size_id: size_id.0,
            });
        }

        let mut next = self.clone();
        next.overrides
            .entry(item_id)
            .or_default()
            .insert(size_id, price);
        Ok(next)
    }

    /// Same selection and expansion, no overrides.
    pub fn without_overrides(&self) -> Self {
        let mut next = self.clone();
        next.overrides.clear();
        next
    }

    fn remove_override(&mut self, item_id: ItemId, size_id: SizeId) {
        if let Some(sizes) = self.overrides.get_mut(&item_id) {
            sizes.remove(&size_id);
            if sizes.is_empty() {
                self.overrides.remove(&item_id);
            }
        }
    }
}
