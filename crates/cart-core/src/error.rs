//! Cart error types.

use crate::ids::ProductId;
use std::fmt;
use thiserror::Error;

/// Boxed source error from a remote lookup.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The cart operation an error was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Adding one unit of a product.
    Add,
    /// Removing a line item.
    Remove,
    /// Setting a line item's quantity.
    Update,
}

impl Operation {
    /// Human-readable name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add product",
            Operation::Remove => "remove product",
            Operation::Update => "update product amount",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur in cart operations.
///
/// None of these are fatal: a failed operation leaves the cart as it was.
#[derive(Error, Debug)]
pub enum CartError {
    /// Requested quantity exceeds the available stock.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// Product is not in the cart.
    #[error("Product not in cart: {0}")]
    ProductNotFoundInCart(ProductId),

    /// Inventory or catalog lookup failed.
    #[error("Failed to {operation}: {source}")]
    Fetch {
        operation: Operation,
        #[source]
        source: BoxError,
    },

    /// Product is already in the cart.
    #[error("Product already in cart: {0}")]
    DuplicateProduct(ProductId),

    /// Line item quantity below one.
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: ProductId, quantity: u32 },
}

impl CartError {
    /// Wrap a lookup failure raised while running `operation`.
    pub fn fetch(operation: Operation, source: impl Into<BoxError>) -> Self {
        CartError::Fetch {
            operation,
            source: source.into(),
        }
    }

    /// Check if this is a stock failure.
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, CartError::OutOfStock { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_stock_message() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 3,
            available: 2,
        };
        assert!(err.is_out_of_stock());
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 1: requested 3, available 2"
        );
    }

    #[test]
    fn test_fetch_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = CartError::fetch(Operation::Add, io);

        assert_eq!(err.to_string(), "Failed to add product: refused");
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_out_of_stock());
    }
}
