use crate::core::state::MenuState;
use crate::domain::model::{ItemId, SizeId};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// What a presentation layer needs to draw the accordion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub title: String,
    pub items: Vec<ItemRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub item_id: ItemId,
    pub name: String,
    pub expanded: bool,
    pub sizes: Vec<SizeRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRow {
    pub size_id: SizeId,
    pub name: String,
    pub active: bool,
    /// Effective price with two decimals, e.g. `"8.00"`.
    pub price: String,
    /// Only active sizes take price edits.
    pub editable: bool,
}

impl MenuView {
    pub fn build(title: &str, state: &MenuState) -> Self {
        let catalog = state.catalog();
        let items = catalog
            .items()
            .iter()
            .map(|item| ItemRow {
                item_id: item.item_id,
                name: item.name.clone(),
                expanded: state.is_expanded(item.item_id),
                sizes: catalog
                    .sizes()
                    .iter()
                    .map(|size| {
                        let active = state.is_active(item.item_id, size.size_id);
                        SizeRow {
                            size_id: size.size_id,
                            name: size.name.clone(),
                            active,
                            price: display_price(
                                state.effective_price(item.item_id, size.size_id),
                            ),
                            editable: active,
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: title.to_string(),
            items,
        }
    }
}

/// Two decimals, half away from zero (`1.005` shows as `1.01`).
pub fn display_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

impl fmt::Display for MenuView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for item in &self.items {
            let marker = if item.expanded { "▾" } else { "▸" };
            writeln!(f, "{} [{}] {}", marker, item.item_id, item.name)?;
            if !item.expanded {
                continue;
            }
            for size in &item.sizes {
                let check = if size.active { "x" } else { " " };
                writeln!(
                    f,
                    "    [{}] {:<3} {:<12} $ {:>8}",
                    check,
                    size.size_id.to_string(),
                    size.name,
                    size.price
                )?;
            }
        }
        Ok(())
    }
}
