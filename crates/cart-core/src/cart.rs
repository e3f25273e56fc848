//! Cart and line item types.
//!
//! Every mutation validates before it touches the item list, so a failed
//! call leaves the cart exactly as it was.

use crate::error::CartError;
use crate::ids::ProductId;
use crate::product::{Product, StockInfo};
use serde::{Deserialize, Serialize};

/// A line item in the cart.
///
/// Persisted as `{id, name, price, image, amount}` where `amount` is the
/// quantity in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product ID, unique within the cart.
    pub id: ProductId,
    /// Product name (denormalized for display).
    #[serde(alias = "title")]
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    pub image: String,
    /// Quantity, always at least one.
    #[serde(rename = "amount")]
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item holding one unit of `product`.
    pub fn from_product(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            quantity: 1,
        }
    }

    /// Set the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Unit price times quantity.
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A shopping cart: line items in insertion order, unique by product.
///
/// Serialized as a bare JSON array of line items. Decoding rejects arrays
/// that repeat a product or hold a zero quantity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from items, checking uniqueness and quantities.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for item in items {
            cart.append(item)?;
        }
        Ok(cart)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Get an item by product ID.
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == product_id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of line subtotals.
    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Append a product that is not yet in the cart.
    pub fn append(&mut self, item: LineItem) -> Result<(), CartError> {
        if item.quantity == 0 {
            return Err(CartError::InvalidQuantity {
                product_id: item.id,
                quantity: item.quantity,
            });
        }
        if self.contains(item.id) {
            return Err(CartError::DuplicateProduct(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    /// Add one unit of a product already in the cart.
    ///
    /// Returns the new quantity.
    pub fn increment(&mut self, product_id: ProductId, stock: &StockInfo) -> Result<u32, CartError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == product_id)
            .ok_or(CartError::ProductNotFoundInCart(product_id))?;

        let requested = u64::from(item.quantity) + 1;
        if !stock.can_fulfill(requested) {
            return Err(CartError::OutOfStock {
                product_id,
                requested,
                available: stock.available_quantity,
            });
        }

        item.quantity += 1;
        Ok(item.quantity)
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// Stock is checked before the item is looked up, so an unavailable
    /// quantity reports `OutOfStock` even for a product not in the cart.
    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        stock: &StockInfo,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity {
                product_id,
                quantity,
            });
        }
        if !stock.can_fulfill(u64::from(quantity)) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: u64::from(quantity),
                available: stock.available_quantity,
            });
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == product_id)
            .ok_or(CartError::ProductNotFoundInCart(product_id))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Remove a product, returning its line item.
    pub fn remove(&mut self, product_id: ProductId) -> Result<LineItem, CartError> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == product_id)
            .ok_or(CartError::ProductNotFoundInCart(product_id))?;
        Ok(self.items.remove(index))
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, quantity: u32) -> LineItem {
        LineItem::from_product(Product::new(ProductId::new(id), "Shoe", 100.0, "x"))
            .with_quantity(quantity)
    }

    fn stock(id: u64, available: u32) -> StockInfo {
        StockInfo::new(ProductId::new(id), available)
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_line_item_from_product_ignores_catalog_stock() {
        let product = Product::new(ProductId::new(1), "Shoe", 100.0, "x").with_stock(5);
        let item = LineItem::from_product(product);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.append(item(2, 1)).unwrap();
        cart.append(item(1, 1)).unwrap();

        let ids: Vec<u64> = cart.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_append_rejects_duplicate_and_zero() {
        let mut cart = Cart::new();
        cart.append(item(1, 1)).unwrap();

        assert!(matches!(
            cart.append(item(1, 1)),
            Err(CartError::DuplicateProduct(_))
        ));
        assert!(matches!(
            cart.append(item(2, 0)),
            Err(CartError::InvalidQuantity { .. })
        ));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_increment_within_stock() {
        let mut cart = Cart::from_items(vec![item(1, 1)]).unwrap();
        assert_eq!(cart.increment(ProductId::new(1), &stock(1, 2)).unwrap(), 2);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 2);
    }

    #[test]
    fn test_increment_past_stock_leaves_cart() {
        let mut cart = Cart::from_items(vec![item(1, 2)]).unwrap();
        let before = cart.clone();

        let err = cart.increment(ProductId::new(1), &stock(1, 2)).unwrap_err();
        assert!(matches!(
            err,
            CartError::OutOfStock {
                requested: 3,
                available: 2,
                ..
            }
        ));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::from_items(vec![item(1, 1)]).unwrap();
        cart.set_quantity(ProductId::new(1), 3, &stock(1, 10)).unwrap();
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 3);

        assert!(cart
            .set_quantity(ProductId::new(1), 11, &stock(1, 10))
            .unwrap_err()
            .is_out_of_stock());
        assert!(matches!(
            cart.set_quantity(ProductId::new(9), 1, &stock(9, 10)),
            Err(CartError::ProductNotFoundInCart(_))
        ));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 3);
    }

    #[test]
    fn test_remove_only_target() {
        let mut cart = Cart::from_items(vec![item(1, 1), item(2, 1)]).unwrap();
        let removed = cart.remove(ProductId::new(1)).unwrap();

        assert_eq!(removed.id, ProductId::new(1));
        assert_eq!(cart.items(), &[item(2, 1)]);
        assert!(cart.remove(ProductId::new(1)).is_err());
    }

    #[test]
    fn test_totals() {
        let mut a = item(1, 2);
        a.price = 10.0;
        let mut b = item(2, 1);
        b.price = 25.5;
        let cart = Cart::from_items(vec![a, b]).unwrap();

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.total(), 45.5);
    }

    #[test]
    fn test_serialized_shape() {
        let cart = Cart::from_items(vec![item(1, 1)]).unwrap();
        let json = serde_json::to_value(&cart).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{"id": 1, "name": "Shoe", "price": 100.0, "image": "x", "amount": 1}])
        );
    }

    #[test]
    fn test_decode_rejects_broken_invariants() {
        let duplicate = r#"[{"id":1,"name":"a","price":1,"image":"x","amount":1},
                            {"id":1,"name":"a","price":1,"image":"x","amount":2}]"#;
        assert!(serde_json::from_str::<Cart>(duplicate).is_err());

        let zero = r#"[{"id":1,"name":"a","price":1,"image":"x","amount":0}]"#;
        assert!(serde_json::from_str::<Cart>(zero).is_err());

        assert!(serde_json::from_str::<Cart>(r#"{"not":"an array"}"#).is_err());
    }
}
