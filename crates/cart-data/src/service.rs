//! Lookup seams the cart store depends on.

use async_trait::async_trait;
use cart_core::{Product, ProductId, StockInfo};

use crate::FetchError;

/// Stock lookup by product.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Current available stock for `product_id`.
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, FetchError>;
}

/// Product details lookup.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Name, price and image for `product_id`.
    async fn product(&self, product_id: ProductId) -> Result<Product, FetchError>;
}
