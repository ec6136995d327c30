pub mod engine;
pub mod persistence;
pub mod state;

pub use crate::domain::model::{Catalog, ItemId, PriceOverrides, SizeId};
pub use crate::domain::ports::KeyValueStore;
pub use crate::utils::error::Result;
