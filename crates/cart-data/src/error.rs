//! Lookup error types.

use cart_core::ProductId;
use thiserror::Error;

/// Errors that can occur when looking up stock or products.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP error response.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// Request timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Failed to send the request.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The backing source could not be read.
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The catalog answered with a different product.
    #[error("Catalog returned product {returned} for {requested}")]
    UnexpectedProduct {
        requested: ProductId,
        returned: ProductId,
    },
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        let url = e.url().map(|u| u.to_string()).unwrap_or_default();
        if e.is_timeout() {
            FetchError::Timeout(url)
        } else if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Http {
                status: status.as_u16(),
                url,
            }
        } else {
            FetchError::Connection(e.to_string())
        }
    }
}
