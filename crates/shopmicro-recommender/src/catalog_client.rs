//! Catalog service client.

use reqwest::Client;
use serde::Deserialize;
use shopmicro_core::{ShopError, ShopResult};
use std::time::Duration;
use tracing::debug;

const SERVICE: &str = "catalog";

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    name: Option<String>,
}

/// Fetches product names from the catalog service.
pub struct CatalogClient {
    client: Client,
    products_url: String,
}

impl CatalogClient {
    /// Creates a client for `products_url` with a request timeout.
    pub fn new(products_url: impl Into<String>, timeout: Duration) -> ShopResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ShopError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            products_url: products_url.into(),
        })
    }

    /// Returns every product name in catalog order. Entries without a name
    /// are skipped.
    pub async fn product_names(&self) -> ShopResult<Vec<String>> {
        let response = self
            .client
            .get(&self.products_url)
            .send()
            .await
            .map_err(|e| ShopError::upstream(SERVICE, e.to_string()))?;

        let status = response.status();
        debug!(url = %self.products_url, status = status.as_u16(), "Fetched products from backend");
        if !status.is_success() {
            return Err(ShopError::upstream(SERVICE, format!("HTTP {status}")));
        }

        let entries: Vec<CatalogEntry> = response
            .json()
            .await
            .map_err(|e| ShopError::upstream(SERVICE, format!("invalid response body: {e}")))?;

        Ok(entries.into_iter().filter_map(|e| e.name).collect())
    }
}
