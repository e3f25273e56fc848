//! Key-Value persistence for cart state.
//!
//! Provides the durable storage seam a storefront keeps its cart in, with
//! automatic JSON serialization on top.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use cart_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(Arc::new(MemoryStore::new()));
//!
//! cache.set("cart", &vec![1, 2, 3]).unwrap();
//! let items: Option<Vec<u32>> = cache.get("cart").unwrap();
//! assert_eq!(items, Some(vec![1, 2, 3]));
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
