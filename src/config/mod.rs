pub mod menu_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

pub use menu_config::MenuConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "menu-pricing")]
#[command(about = "Pizza menu pricing: toggle sizes and edit prices, saved locally")]
pub struct CliConfig {
    /// Path to the TOML menu file
    #[arg(short, long, default_value = "menu.toml")]
    pub config: String,

    /// Override the storage directory from the menu file
    #[arg(long)]
    pub storage_dir: Option<String>,

    /// Override the storage key from the menu file
    #[arg(long)]
    pub storage_key: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Write logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the menu with current prices
    Show {
        /// Item to show expanded
        #[arg(long)]
        expand: Option<u32>,
    },
    /// Switch a size on or off for an item
    Toggle { item: u32, size: u32 },
    /// Set the price of an item size
    SetPrice {
        item: u32,
        size: u32,
        /// New price, e.g. 9.50
        value: String,
    },
    /// Drop every saved price
    Reset,
    /// Interactive shell
    Repl,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Applies command-line overrides on top of the menu file.
    pub fn apply_overrides(&self, menu: &mut MenuConfig) {
        if let Some(dir) = &self.storage_dir {
            tracing::info!("🔧 Storage directory overridden to: {}", dir);
            menu.storage.path = dir.clone();
        }
        if let Some(key) = &self.storage_key {
            tracing::info!("🔧 Storage key overridden to: {}", key);
            menu.storage.key = key.clone();
        }
    }
}
