//! Recommender configuration.

use shopmicro_core::{ShopError, ShopResult};
use std::collections::HashMap;
use std::time::Duration;

/// Default catalog service base URL inside the container network.
pub const DEFAULT_BACKEND_API: &str = "http://backend:8080";

/// Recommender configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommenderConfig {
    /// Catalog service base URL.
    pub backend_api: String,
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Timeout of the catalog fetch.
    pub backend_timeout: Duration,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            backend_api: DEFAULT_BACKEND_API.to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            backend_timeout: Duration::from_secs(5),
        }
    }
}

impl RecommenderConfig {
    /// Reads `BACKEND_API` and `PORT` from the process environment (after `.env`).
    pub fn from_env() -> ShopResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_env_map(&std::env::vars().collect())
    }

    /// Reads configuration from an explicit environment snapshot.
    pub fn from_env_map(env: &HashMap<String, String>) -> ShopResult<Self> {
        let mut config = Self::default();

        if let Some(api) = env.get("BACKEND_API") {
            config.backend_api = api.trim().to_string();
        }
        if let Some(port) = env.get("PORT").filter(|p| !p.trim().is_empty()) {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| ShopError::config(format!("PORT: {e}")))?;
        }

        config.products_url()?;
        Ok(config)
    }

    /// Returns `{backend_api}/products`.
    ///
    /// The base must start with `http://` or `https://`; trailing slashes are
    /// dropped.
    pub fn products_url(&self) -> ShopResult<String> {
        let base = self.backend_api.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ShopError::config(format!(
                "BACKEND_API must start with http:// or https://, got: {base:?}"
            )));
        }
        Ok(format!("{}/products", base.trim_end_matches('/')))
    }

    /// Returns the listen address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = RecommenderConfig::from_env_map(&HashMap::new()).unwrap();
        assert_eq!(config.products_url().unwrap(), "http://backend:8080/products");
        assert_eq!(config.addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_trailing_slashes_trimmed() {
        let config =
            RecommenderConfig::from_env_map(&env(&[("BACKEND_API", " https://api.shop.io// ")]))
                .unwrap();
        assert_eq!(config.products_url().unwrap(), "https://api.shop.io/products");
    }

    #[test]
    fn test_scheme_required() {
        let err = RecommenderConfig::from_env_map(&env(&[("BACKEND_API", "backend:8080")]))
            .unwrap_err();
        assert!(matches!(err, ShopError::ConfigInvalid(_)));
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn test_port_override() {
        let config = RecommenderConfig::from_env_map(&env(&[("PORT", "5050")])).unwrap();
        assert_eq!(config.port, 5050);

        assert!(RecommenderConfig::from_env_map(&env(&[("PORT", "five")])).is_err());
    }
}
