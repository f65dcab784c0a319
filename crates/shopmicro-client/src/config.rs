//! Client configuration.

use shopmicro_core::{ShopError, ShopResult, DEMO_USER_ID};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Default catalog service base URL.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";
/// Default recommendation service base URL.
pub const DEFAULT_ML_BASE: &str = "http://localhost:5000";

/// Where the client fetches its data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Catalog service base URL, without trailing slash.
    pub api_base: String,
    /// Recommendation service base URL, without trailing slash.
    pub ml_base: String,
    /// User whose recommendations are shown.
    pub user_id: u32,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            ml_base: DEFAULT_ML_BASE.to_string(),
            user_id: DEMO_USER_ID,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Reads `VITE_API_BASE` and `VITE_ML_BASE` from the process environment
    /// (after `.env`).
    pub fn from_env() -> ShopResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_env_map(&std::env::vars().collect())
    }

    /// Reads configuration from an explicit environment snapshot.
    pub fn from_env_map(env: &HashMap<String, String>) -> ShopResult<Self> {
        let api_base = base_url(env, "VITE_API_BASE", DEFAULT_API_BASE)?;
        let ml_base = base_url(env, "VITE_ML_BASE", DEFAULT_ML_BASE)?;
        Ok(Self {
            api_base,
            ml_base,
            ..Self::default()
        })
    }
}

fn base_url(env: &HashMap<String, String>, name: &str, default: &str) -> ShopResult<String> {
    let raw = env
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or(default);

    let url = Url::parse(raw).map_err(|e| ShopError::config(format!("{name}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ShopError::config(format!(
            "{name} must start with http:// or https://, got: {raw}"
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
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
        let config = ClientConfig::from_env_map(&HashMap::new()).unwrap();
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.ml_base, "http://localhost:5000");
        assert_eq!(config.user_id, 42);
    }

    #[test]
    fn test_overrides_trim_trailing_slash() {
        let config = ClientConfig::from_env_map(&env(&[
            ("VITE_API_BASE", "https://shop.example.com/"),
            ("VITE_ML_BASE", "http://ml:5000"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "https://shop.example.com");
        assert_eq!(config.ml_base, "http://ml:5000");
    }

    #[test]
    fn test_non_http_base_rejected() {
        let err = ClientConfig::from_env_map(&env(&[("VITE_ML_BASE", "ftp://ml")])).unwrap_err();
        assert!(matches!(err, ShopError::ConfigInvalid(_)));
    }
}
