//! Catalog and inventory records as served by the storefront API.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product as returned by the catalog.
///
/// The catalog payload carries an `amount` field that means *stock on hand*,
/// not a cart quantity. It is exposed here as `available_stock` and is never
/// copied into a [`LineItem`](crate::LineItem).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(alias = "title")]
    pub name: String,
    /// Unit price in the currency's major unit.
    pub price: f64,
    /// Image URL.
    pub image: String,
    /// Stock reported alongside the product, if any.
    #[serde(rename = "amount", default)]
    pub available_stock: u32,
}

impl Product {
    /// Create a product with no stock information attached.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: image.into(),
            available_stock: 0,
        }
    }

    /// Attach a stock figure.
    pub fn with_stock(mut self, available_stock: u32) -> Self {
        self.available_stock = available_stock;
        self
    }
}

/// Point-in-time stock snapshot for one product.
///
/// Fetched per operation and never cached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockInfo {
    /// Product the snapshot belongs to.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Units available for purchase.
    #[serde(rename = "amount")]
    pub available_quantity: u32,
}

impl StockInfo {
    /// Stock record for `product_id`.
    pub fn new(product_id: ProductId, available_quantity: u32) -> Self {
        Self {
            product_id,
            available_quantity,
        }
    }

    /// Check if a specific quantity is available.
    pub fn can_fulfill(&self, quantity: u64) -> bool {
        quantity <= u64::from(self.available_quantity)
    }

    /// Check if nothing can be bought.
    pub fn is_out_of_stock(&self) -> bool {
        self.available_quantity < 1
    }
}
