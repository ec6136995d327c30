use crate::core::persistence::DEFAULT_STORAGE_KEY;
use crate::domain::model::{Catalog, DefaultPrice, Item, Size};
use crate::utils::error::{MenuError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_storage_key, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern compiles"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    pub menu: MenuInfo,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub prices: Vec<DefaultPrice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuInfo {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_path() -> String {
    "./.menu-storage".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

impl MenuConfig {
    /// 從 TOML 檔案載入菜單
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析菜單
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${MENU_STORAGE_DIR})
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("menu.title", &self.menu.title)?;
        validate_path("storage.path", &self.storage.path)?;
        validate_storage_key("storage.key", &self.storage.key)?;

        if self.items.is_empty() {
            return Err(MenuError::ConfigValidationError {
                field: "items".to_string(),
                message: "menu has no items".to_string(),
            });
        }
        if self.sizes.is_empty() {
            return Err(MenuError::ConfigValidationError {
                field: "sizes".to_string(),
                message: "menu has no sizes".to_string(),
            });
        }

        // 交叉檢查交給 Catalog::new
        self.to_catalog().map(|_| ())
    }

    pub fn to_catalog(&self) -> Result<Catalog> {
        Catalog::new(self.items.clone(), self.sizes.clone(), self.prices.clone())
    }

    pub fn title(&self) -> &str {
        &self.menu.title
    }
}

impl Validate for MenuConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
