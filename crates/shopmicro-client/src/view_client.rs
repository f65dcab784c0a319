//! Concurrent loading of the storefront view.

use crate::config::ClientConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shopmicro_core::{Product, Recommendations, ShopError, ShopResult};
use tracing::{debug, warn};

const CATALOG: &str = "catalog";
const RECOMMENDATIONS: &str = "recommendations";

/// Everything the storefront shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Products in catalog order.
    pub products: Vec<Product>,
    /// Recommended product names in service order.
    pub recommendations: Vec<String>,
}

/// HTTP client for the catalog and recommendation services.
pub struct ViewClient {
    client: Client,
    api_base: String,
    ml_base: String,
    user_id: u32,
}

impl ViewClient {
    /// Creates a new view client.
    pub fn new(config: &ClientConfig) -> ShopResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ShopError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, config))
    }

    /// Creates a view client around an existing HTTP client.
    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            ml_base: config.ml_base.trim_end_matches('/').to_string(),
            user_id: config.user_id,
        }
    }

    /// Fetches products and recommendations concurrently.
    ///
    /// Succeeds only if both fetches do; otherwise returns one `UpstreamFault`
    /// naming every failed dependency. There is no partial view.
    pub async fn load_view(&self) -> ShopResult<View> {
        let (products, recommendations) =
            tokio::join!(self.fetch_products(), self.fetch_recommendations());

        match (products, recommendations) {
            (Ok(products), Ok(recommendations)) => Ok(View {
                products,
                recommendations: recommendations.recommendations,
            }),
            (products, recommendations) => {
                let failures: Vec<ShopError> = [products.err(), recommendations.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                Err(aggregate(&failures))
            }
        }
    }

    async fn fetch_products(&self) -> ShopResult<Vec<Product>> {
        self.get_json(CATALOG, &format!("{}/products", self.api_base))
            .await
    }

    async fn fetch_recommendations(&self) -> ShopResult<Recommendations> {
        self.get_json(
            RECOMMENDATIONS,
            &format!("{}/recommendations/{}", self.ml_base, self.user_id),
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(&self, service: &str, url: &str) -> ShopResult<T> {
        debug!(service, url, "Fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ShopError::upstream(service, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShopError::upstream(service, format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| ShopError::upstream(service, format!("invalid response body: {e}")))
    }
}

fn aggregate(failures: &[ShopError]) -> ShopError {
    for failure in failures {
        warn!(error = %failure, "Fetch error");
    }

    let services = failures
        .iter()
        .filter_map(|e| match e {
            ShopError::UpstreamFault { service, .. } => Some(service.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(", ");
    let detail = failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");

    ShopError::upstream(services, format!("Failed to fetch data ({detail})"))
}
