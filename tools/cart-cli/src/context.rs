//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use cart_cache::FileStore;
use cart_core::Product;
use cart_data::{FixtureApi, HttpApi, InventoryService, ProductCatalog};
use cart_store::{CartStore, Services};
use tracing::debug;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::{ConsoleNotifier, Output};

/// Where product and stock lookups are served from.
pub enum Backend {
    Http(Arc<HttpApi>),
    Fixture(Arc<FixtureApi>),
}

impl Backend {
    fn inventory(&self) -> Arc<dyn InventoryService> {
        match self {
            Backend::Http(api) => api.clone() as Arc<dyn InventoryService>,
            Backend::Fixture(api) => api.clone() as Arc<dyn InventoryService>,
        }
    }

    fn catalog(&self) -> Arc<dyn ProductCatalog> {
        match self {
            Backend::Http(api) => api.clone() as Arc<dyn ProductCatalog>,
            Backend::Fixture(api) => api.clone() as Arc<dyn ProductCatalog>,
        }
    }

    /// Every product with its stock attached.
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        match self {
            Backend::Http(api) => {
                let mut products = api.products().await.context("Failed to list products")?;
                let stock = api.stock_levels().await.context("Failed to list stock")?;
                for product in &mut products {
                    product.available_stock = stock
                        .iter()
                        .find(|s| s.product_id == product.id)
                        .map(|s| s.available_quantity)
                        .unwrap_or(0);
                }
                Ok(products)
            }
            Backend::Fixture(api) => Ok(api.products()),
        }
    }
}

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self {
            config,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        debug!(path = %config_path.display(), "using config");
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Build the lookup backend from config.
    pub fn backend(&self) -> Result<Backend> {
        match &self.config.api.fixture {
            Some(path) => {
                let path = self.resolve_path(path);
                let api = FixtureApi::load(&path)
                    .with_context(|| format!("Failed to load fixture: {}", path.display()))?;
                Ok(Backend::Fixture(Arc::new(api)))
            }
            None => {
                let api = HttpApi::with_timeout(&self.config.api.base_url, self.config.api.timeout())
                    .context("Failed to create HTTP client")?;
                Ok(Backend::Http(Arc::new(api)))
            }
        }
    }

    /// Open the cart store over the configured backend and storage file.
    pub fn open_store(&self) -> Result<CartStore> {
        let backend = self.backend()?;
        let storage_path = self.resolve_path(&self.config.storage.path);
        let storage = FileStore::open(&storage_path)
            .with_context(|| format!("Failed to open storage: {}", storage_path.display()))?;

        let services = Services::new(backend.inventory(), backend.catalog(), Arc::new(storage))
            .with_notifier(Arc::new(ConsoleNotifier::new(self.output.clone())));

        Ok(CartStore::initialize(services, self.config.store.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("cart.toml"),
            "[store]\nstorage_key = \"found\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = Context::find_config(&nested).unwrap();
        assert_eq!(config.store.storage_key, "found");
    }

    #[test]
    fn test_resolve_path() {
        let ctx = Context {
            config: CliConfig::default(),
            output: Output::new(false, true),
            cwd: PathBuf::from("/work"),
        };
        assert_eq!(ctx.resolve_path("db.json"), PathBuf::from("/work/db.json"));
        assert_eq!(ctx.resolve_path("/abs/db.json"), PathBuf::from("/abs/db.json"));
    }

    #[tokio::test]
    async fn test_open_store_with_fixture() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("db.json"),
            r#"{"products":[{"id":1,"title":"Shoe","price":10,"image":"x"}],"stock":[{"id":1,"amount":2}]}"#,
        )
        .unwrap();

        let mut config = CliConfig::default();
        config.api.fixture = Some("db.json".to_string());
        let ctx = Context {
            config,
            output: Output::new(false, true),
            cwd: dir.path().to_path_buf(),
        };

        let store = ctx.open_store().unwrap();
        store.add_product(cart_core::ProductId::new(1)).await.unwrap();
        drop(store);

        let reopened = ctx.open_store().unwrap();
        assert_eq!(reopened.cart().total_quantity(), 1);
        assert!(dir.path().join(".cart").join("storage.json").exists());

        let products = ctx.backend().unwrap().list_products().await.unwrap();
        assert_eq!(products[0].available_stock, 2);
    }
}
