pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{LocalStorage, MemoryStorage};
pub use app::MenuView;
pub use config::MenuConfig;
pub use core::engine::{DispatchOutcome, Intent, MenuEngine, PersistStatus};
pub use core::state::MenuState;
pub use domain::model::{Catalog, ItemId, PriceOverrides, SizeId};
pub use domain::ports::KeyValueStore;
pub use utils::error::{MenuError, Result};
