use crate::utils::error::{MenuError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_non_negative_price, validate_unique};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SizeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: ItemId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub size_id: SizeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultPrice {
    pub item_id: ItemId,
    pub size_id: SizeId,
    pub price: Decimal,
}

/// User-edited prices, item -> size -> price. This is also the persisted snapshot.
pub type PriceOverrides = BTreeMap<ItemId, BTreeMap<SizeId, Decimal>>;

/// Which sizes are offered per item. Missing entries count as inactive.
pub type ActiveSelection = BTreeMap<ItemId, BTreeMap<SizeId, bool>>;

/// Read-only menu table: items, sizes, and the default price of each offered pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    items: Vec<Item>,
    sizes: Vec<Size>,
    default_prices: BTreeMap<(ItemId, SizeId), Decimal>,
}

impl Catalog {
    pub fn new(items: Vec<Item>, sizes: Vec<Size>, prices: Vec<DefaultPrice>) -> Result<Self> {
        validate_unique("items.item_id", items.iter().map(|item| item.item_id))?;
        validate_unique("sizes.size_id", sizes.iter().map(|size| size.size_id))?;
        for item in &items {
            validate_non_empty_string("items.name", &item.name)?;
        }
        for size in &sizes {
            validate_non_empty_string("sizes.name", &size.name)?;
        }

        let mut default_prices = BTreeMap::new();
        for entry in prices {
            if !items.iter().any(|item| item.item_id == entry.item_id) {
                return Err(MenuError::ConfigValidationError {
                    field: "prices.item_id".to_string(),
                    message: format!("price references unknown item {}", entry.item_id),
                });
            }
            if !sizes.iter().any(|size| size.size_id == entry.size_id) {
                return Err(MenuError::ConfigValidationError {
                    field: "prices.size_id".to_string(),
                    message: format!("price references unknown size {}", entry.size_id),
                });
            }
            validate_non_negative_price("prices.price", entry.price)?;

            if default_prices
                .insert((entry.item_id, entry.size_id), entry.price)
                .is_some()
            {
                return Err(MenuError::InvalidConfigValueError {
                    field: "prices".to_string(),
                    value: format!("({}, {})", entry.item_id, entry.size_id),
                    reason: "Duplicate price for item and size".to_string(),
                });
            }
        }

        Ok(Self {
            items,
            sizes,
            default_prices,
        })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    pub fn item(&self, item_id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.item_id == item_id)
    }

    pub fn size(&self, size_id: SizeId) -> Option<&Size> {
        self.sizes.iter().find(|size| size.size_id == size_id)
    }

    pub fn default_price(&self, item_id: ItemId, size_id: SizeId) -> Option<Decimal> {
        self.default_prices.get(&(item_id, size_id)).copied()
    }

    /// Every (item, size) pair that has a default price, in id order.
    pub fn offered_pairs(&self) -> impl Iterator<Item = (ItemId, SizeId)> + '_ {
        self.default_prices.keys().copied()
    }

    /// Fails with `UnknownItem` / `UnknownSize` when either id is not on the menu.
    pub fn check_pair(&self, item_id: ItemId, size_id: SizeId) -> Result<()> {
        self.check_item(item_id)?;
        if self.size(size_id).is_none() {
            return Err(MenuError::UnknownSize { size_id: size_id.0 });
        }
        Ok(())
    }

    pub fn check_item(&self, item_id: ItemId) -> Result<()> {
        if self.item(item_id).is_none() {
            return Err(MenuError::UnknownItem { item_id: item_id.0 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, name: &str) -> Item {
        Item {
            item_id: ItemId(id),
            name: name.to_string(),
        }
    }

    fn size(id: u32, name: &str) -> Size {
        Size {
            size_id: SizeId(id),
            name: name.to_string(),
        }
    }

    fn price(item_id: u32, size_id: u32, cents: i64) -> DefaultPrice {
        DefaultPrice {
            item_id: ItemId(item_id),
            size_id: SizeId(size_id),
            price: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn test_catalog_lookups() {
        let catalog = Catalog::new(
            vec![item(1, "Margherita"), item(2, "Pepperoni")],
            vec![size(1, "Small"), size(2, "Large")],
            vec![price(1, 1, 800), price(1, 2, 1200), price(2, 2, 1400)],
        )
        .unwrap();

        assert_eq!(catalog.item(ItemId(2)).unwrap().name, "Pepperoni");
        assert_eq!(catalog.default_price(ItemId(1), SizeId(2)), Some(Decimal::new(1200, 2)));
        assert_eq!(catalog.default_price(ItemId(2), SizeId(1)), None);
        assert_eq!(catalog.offered_pairs().count(), 3);
        assert!(catalog.check_pair(ItemId(1), SizeId(1)).is_ok());
        assert!(matches!(
            catalog.check_pair(ItemId(9), SizeId(1)),
            Err(MenuError::UnknownItem { item_id: 9 })
        ));
        assert!(matches!(
            catalog.check_pair(ItemId(1), SizeId(9)),
            Err(MenuError::UnknownSize { size_id: 9 })
        ));
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let result = Catalog::new(
            vec![item(1, "Margherita"), item(1, "Pepperoni")],
            vec![size(1, "Small")],
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_rejects_dangling_and_duplicate_prices() {
        let dangling = Catalog::new(
            vec![item(1, "Margherita")],
            vec![size(1, "Small")],
            vec![price(1, 3, 800)],
        );
        assert!(matches!(dangling, Err(MenuError::ConfigValidationError { .. })));

        let duplicate = Catalog::new(
            vec![item(1, "Margherita")],
            vec![size(1, "Small")],
            vec![price(1, 1, 800), price(1, 1, 900)],
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_catalog_rejects_negative_price() {
        let result = Catalog::new(
            vec![item(1, "Margherita")],
            vec![size(1, "Small")],
            vec![price(1, 1, -100)],
        );
        assert!(result.is_err());
    }
}
