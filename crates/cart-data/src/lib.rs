//! Inventory and catalog lookups for the cart.
//!
//! This crate provides:
//! - `InventoryService` / `ProductCatalog` - request/response lookup seams
//! - `HttpApi` - both seams over the storefront REST API
//! - `FixtureApi` - both seams over a `db.json` document
//! - `FetchError` - lookup failures

mod error;
mod fixture;
mod http;
mod service;

pub use error::FetchError;
pub use fixture::FixtureApi;
pub use http::{HttpApi, DEFAULT_BASE_URL};
pub use service::{InventoryService, ProductCatalog};
