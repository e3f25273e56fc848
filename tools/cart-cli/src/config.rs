//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use cart_data::DEFAULT_BASE_URL;
use cart_store::StoreConfig;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["cart.toml", ".cart.toml", "cart.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cart store configuration.
    #[serde(default)]
    pub store: StoreConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config text, choosing the format from the file name.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Problems that make the config unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.api.fixture.is_none()
            && !(self.api.base_url.starts_with("http://")
                || self.api.base_url.starts_with("https://"))
        {
            errors.push(format!(
                "api.base_url '{}' must start with http:// or https://",
                self.api.base_url
            ));
        }
        if self.api.timeout_ms == Some(0) {
            errors.push("api.timeout_ms must be greater than 0".to_string());
        }
        if self.storage.path.trim().is_empty() {
            errors.push("storage.path is required".to_string());
        }
        if self.store.storage_key.is_empty() {
            errors.push("store.storage_key is required".to_string());
        }

        errors
    }
}

/// Storefront API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the storefront API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds (default: none).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Serve lookups from a `db.json` file instead of HTTP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: None,
            fixture: None,
        }
    }
}

/// Local storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the storage file, relative to the working directory.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    ".cart/storage.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Generate a default cart.toml config file.
pub fn generate_default_config() -> String {
    r#"# Cart configuration

[api]
base_url = "http://localhost:3333"
# timeout_ms = 5000
# Read products and stock from a local file instead of the API
# fixture = "db.json"

[storage]
path = ".cart/storage.json"

[store]
storage_key = "@RocketShoes:cart"

[store.messages]
add_succeeded = "Product added to cart"
out_of_stock = "Requested quantity is out of stock"
add_failed = "Failed to add product"
remove_failed = "Failed to remove product"
update_failed = "Failed to update product amount"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_matches_defaults() {
        let config = CliConfig::parse("cart.toml", &generate_default_config()).unwrap();
        let defaults = CliConfig::default();

        assert_eq!(config.api.base_url, defaults.api.base_url);
        assert_eq!(config.storage.path, defaults.storage.path);
        assert_eq!(config.store, defaults.store);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_toml() {
        let config = CliConfig::parse(
            "cart.toml",
            "[api]\nfixture = \"db.json\"\ntimeout_ms = 250\n",
        )
        .unwrap();

        assert_eq!(config.api.fixture.as_deref(), Some("db.json"));
        assert_eq!(config.api.timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.storage.path, ".cart/storage.json");
    }

    #[test]
    fn test_json_config() {
        let config = CliConfig::parse(
            "cart.json",
            r#"{"store":{"storage_key":"shop:cart"}}"#,
        )
        .unwrap();
        assert_eq!(config.store.storage_key, "shop:cart");
    }

    #[test]
    fn test_validate_reports_problems() {
        let mut config = CliConfig::default();
        config.api.base_url = "localhost:3333".to_string();
        config.api.timeout_ms = Some(0);
        config.store.storage_key.clear();

        assert_eq!(config.validate().len(), 3);

        config.api.fixture = Some("db.json".to_string());
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        assert!(CliConfig::load(path.to_str().unwrap()).is_err());
    }
}
