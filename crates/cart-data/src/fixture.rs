//! Lookups served from a `db.json` document.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use cart_core::{Product, ProductId, StockInfo};
use serde::Deserialize;

use crate::{FetchError, InventoryService, ProductCatalog};

/// On-disk shape: `{ "products": [...], "stock": [...] }`.
#[derive(Debug, Default, Deserialize)]
struct Document {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    stock: Vec<StockInfo>,
}

/// Inventory and catalog held in memory.
///
/// Loads the same document a mock storefront server would serve, and lets
/// stock be changed between lookups.
#[derive(Debug, Default)]
pub struct FixtureApi {
    products: RwLock<BTreeMap<ProductId, Product>>,
    stock: RwLock<BTreeMap<ProductId, u32>>,
}

impl FixtureApi {
    /// Create an empty fixture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `db.json` document.
    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        let document: Document = serde_json::from_str(json)?;
        let fixture = Self::new();
        for product in document.products {
            fixture.insert_product(product);
        }
        for stock in document.stock {
            fixture.set_stock(stock.product_id, stock.available_quantity);
        }
        Ok(fixture)
    }

    /// Read a `db.json` document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FetchError::Unavailable(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Add a product.
    pub fn with_product(self, product: Product) -> Self {
        self.insert_product(product);
        self
    }

    /// Set stock for a product.
    pub fn with_stock(self, product_id: ProductId, amount: u32) -> Self {
        self.set_stock(product_id, amount);
        self
    }

    /// Insert or replace a product.
    pub fn insert_product(&self, product: Product) {
        let mut products = self.products.write().unwrap_or_else(|e| e.into_inner());
        products.insert(product.id, product);
    }

    /// Insert or replace a stock figure.
    pub fn set_stock(&self, product_id: ProductId, amount: u32) {
        let mut stock = self.stock.write().unwrap_or_else(|e| e.into_inner());
        stock.insert(product_id, amount);
    }

    /// All products with their stock attached, ordered by id.
    pub fn products(&self) -> Vec<Product> {
        let products = self.products.read().unwrap_or_else(|e| e.into_inner());
        let stock = self.stock.read().unwrap_or_else(|e| e.into_inner());
        products
            .values()
            .map(|p| {
                let amount = stock.get(&p.id).copied().unwrap_or(0);
                p.clone().with_stock(amount)
            })
            .collect()
    }
}

#[async_trait]
impl InventoryService for FixtureApi {
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, FetchError> {
        let stock = self.stock.read().unwrap_or_else(|e| e.into_inner());
        stock
            .get(&product_id)
            .map(|amount| StockInfo::new(product_id, *amount))
            .ok_or_else(|| FetchError::NotFound(format!("stock/{}", product_id)))
    }
}

#[async_trait]
impl ProductCatalog for FixtureApi {
    async fn product(&self, product_id: ProductId) -> Result<Product, FetchError> {
        let products = self.products.read().unwrap_or_else(|e| e.into_inner());
        products
            .get(&product_id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(format!("products/{}", product_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DB: &str = r#"{
        "products": [
            {"id": 1, "title": "Tênis de Caminhada Leve Confortável", "price": 179.9, "image": "a.jpg"},
            {"id": 2, "title": "Tênis VR Caminhada Confortável Detalhes Couro Masculino", "price": 139.9, "image": "b.jpg"}
        ],
        "stock": [
            {"id": 1, "amount": 3},
            {"id": 2, "amount": 5}
        ]
    }"#;

    #[tokio::test]
    async fn test_from_json() {
        let api = FixtureApi::from_json(DB).unwrap();

        let stock = api.stock(ProductId::new(2)).await.unwrap();
        assert_eq!(stock.available_quantity, 5);

        let product = api.product(ProductId::new(1)).await.unwrap();
        assert_eq!(product.price, 179.9);
    }

    #[tokio::test]
    async fn test_missing_entries_are_not_found() {
        let api = FixtureApi::from_json(DB).unwrap();

        assert!(matches!(
            api.stock(ProductId::new(9)).await,
            Err(FetchError::NotFound(_))
        ));
        assert!(matches!(
            api.product(ProductId::new(9)).await,
            Err(FetchError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_stock_can_change() {
        let api = FixtureApi::new().with_stock(ProductId::new(1), 1);
        api.set_stock(ProductId::new(1), 0);

        let stock = api.stock(ProductId::new(1)).await.unwrap();
        assert!(stock.is_out_of_stock());
    }

    #[test]
    fn test_products_listing_carries_stock() {
        let api = FixtureApi::from_json(DB).unwrap();
        let products = api.products();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].available_stock, 3);
        assert_eq!(products[1].available_stock, 5);
    }

    #[test]
    fn test_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, DB).unwrap();

        assert_eq!(FixtureApi::load(&path).unwrap().products().len(), 2);
        assert!(matches!(
            FixtureApi::load(dir.path().join("missing.json")),
            Err(FetchError::Unavailable(_))
        ));
    }
}
