//! Shopping cart domain types.
//!
//! This crate provides the state a storefront keeps for its cart:
//!
//! - **Catalog**: `Product` records and `StockInfo` snapshots
//! - **Cart**: ordered `LineItem`s, unique by product, with stock-checked mutations
//! - **Errors**: the `CartError` taxonomy every mutation reports through
//!
//! # Example
//!
//! ```rust
//! use cart_core::prelude::*;
//!
//! let shoe = Product::new(ProductId::new(1), "Shoe", 100.0, "shoe.png");
//! let stock = StockInfo::new(ProductId::new(1), 5);
//!
//! let mut cart = Cart::new();
//! cart.append(LineItem::from_product(shoe)).unwrap();
//! cart.increment(ProductId::new(1), &stock).unwrap();
//!
//! assert_eq!(cart.total_quantity(), 2);
//! assert_eq!(cart.total(), 200.0);
//! ```

pub mod cart;
pub mod error;
pub mod ids;
pub mod product;

pub use cart::{Cart, LineItem};
pub use error::{CartError, Operation};
pub use ids::ProductId;
pub use product::{Product, StockInfo};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, LineItem};
    pub use crate::error::{CartError, Operation};
    pub use crate::ids::ProductId;
    pub use crate::product::{Product, StockInfo};
}
