//! Stock-checked, persisted shopping cart state.
//!
//! `CartStore` owns the cart of one storefront session. It checks every
//! mutation against the inventory, writes the whole cart back to durable
//! storage after each change, and reports outcomes to a notification sink.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cart_store::{CartStore, Services, StoreConfig};
//!
//! let api = Arc::new(HttpApi::new(DEFAULT_BASE_URL)?);
//! let storage = Arc::new(FileStore::open(".cart/storage.json")?);
//!
//! let store = CartStore::initialize(
//!     Services::new(api.clone(), api, storage),
//!     StoreConfig::default(),
//! );
//!
//! store.add_product(ProductId::new(1)).await.ok();
//! println!("{} item(s)", store.cart().total_quantity());
//! ```

mod config;
mod notify;
mod store;

pub use config::{Messages, StoreConfig, DEFAULT_STORAGE_KEY};
pub use notify::{Level, Notification, NotificationSink, RecordingNotifier, TracingNotifier};
pub use store::{CartStore, Services};

pub use cart_core::{Cart, CartError, LineItem, ProductId};
