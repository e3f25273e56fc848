//! Storefront REST API client.

use std::time::Duration;

use async_trait::async_trait;
use cart_core::{Product, ProductId, StockInfo};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::{FetchError, InventoryService, ProductCatalog};

/// Base URL of a locally served storefront API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Stock payload of `GET /stock/{id}`.
#[derive(Debug, Deserialize)]
struct StockRecord {
    amount: u32,
}

/// HTTP client for the storefront API.
///
/// Serves stock from `GET {base}/stock/{id}` and products from
/// `GET {base}/products/{id}`. No retries; a request without a configured
/// timeout waits as long as the server does.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client with no request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client whose requests fail after `timeout`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Every product in the catalog, from `GET {base}/products`.
    pub async fn products(&self) -> Result<Vec<Product>, FetchError> {
        self.get_json("products").await
    }

    /// Every stock record, from `GET {base}/stock`.
    pub async fn stock_levels(&self) -> Result<Vec<StockInfo>, FetchError> {
        self.get_json("stock").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url));
        }
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl InventoryService for HttpApi {
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, FetchError> {
        let record: StockRecord = self.get_json(&format!("stock/{}", product_id)).await?;
        Ok(StockInfo::new(product_id, record.amount))
    }
}

#[async_trait]
impl ProductCatalog for HttpApi {
    async fn product(&self, product_id: ProductId) -> Result<Product, FetchError> {
        self.get_json(&format!("products/{}", product_id)).await
    }
}
