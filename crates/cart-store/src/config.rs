//! Store configuration.

use serde::{Deserialize, Serialize};

/// Storage key the cart is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key the serialized cart is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// User-facing notification texts.
    #[serde(default)]
    pub messages: Messages,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            messages: Messages::default(),
        }
    }
}

impl StoreConfig {
    /// Use a different storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

/// Notification texts, one per outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub add_succeeded: String,
    pub out_of_stock: String,
    pub add_failed: String,
    pub remove_failed: String,
    pub update_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            add_succeeded: "Product added to cart".to_string(),
            out_of_stock: "Requested quantity is out of stock".to_string(),
            add_failed: "Failed to add product".to_string(),
            remove_failed: "Failed to remove product".to_string(),
            update_failed: "Failed to update product amount".to_string(),
        }
    }
}
