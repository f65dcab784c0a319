//! Configuration validation.
//!
//! Every check runs and all problems are reported together, so a broken
//! deployment manifest is fixed in one round instead of one variable at a time.

use crate::AppConfig;
use shopmicro_core::{ShopError, ShopResult};
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// A required string value is empty.
    EmptyValue { name: String },
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// Pool size configuration is invalid.
    InvalidPoolSize { min: u32, max: u32 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Sampling ratio must be between 0.0 and 1.0.
    InvalidSamplingRatio { value: f64 },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { name } => write!(f, "{name} must not be empty"),
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {name}: {value} (must be 1-65535)")
            }
            Self::InvalidPoolSize { min, max } => write!(
                f,
                "Invalid pool size: min ({min}) must not exceed max ({max}) and max must be positive"
            ),
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {url_type} URL: {message}")
            }
            Self::InvalidSamplingRatio { value } => write!(
                f,
                "Invalid sampling ratio: {value} (must be between 0.0 and 1.0)"
            ),
            Self::NonPositiveTimeout { name } => write!(f, "Timeout '{name}' must be positive"),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(config, &mut errors);
        Self::validate_database(config, &mut errors);
        Self::validate_redis(config, &mut errors);
        Self::validate_cache(config, &mut errors);
        Self::validate_telemetry(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.server.host.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyValue {
                name: "server.host".to_string(),
            });
        }
        if config.server.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "PORT".to_string(),
                value: 0,
            });
        }
        if config.server.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs".to_string(),
            });
        }
        if !config.observability.metrics_path.starts_with('/') {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "metrics path".to_string(),
                message: "path must start with '/'".to_string(),
            });
        }
    }

    fn validate_database(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let db = &config.database;
        for (name, value) in [("DB_HOST", &db.host), ("DB_USER", &db.user), ("DB_NAME", &db.name)] {
            if value.trim().is_empty() {
                errors.push(ConfigValidationError::EmptyValue {
                    name: name.to_string(),
                });
            }
        }
        if db.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "DB_PORT".to_string(),
                value: 0,
            });
        }
        if db.max_connections == 0 || db.min_connections > db.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: db.min_connections,
                max: db.max_connections,
            });
        }
        if db.connect_timeout_ms == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_ms".to_string(),
            });
        }
        if db.idle_timeout_ms == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.idle_timeout_ms".to_string(),
            });
        }
    }

    fn validate_redis(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        match Url::parse(&config.redis.url) {
            Ok(url) if matches!(url.scheme(), "redis" | "rediss") => {}
            Ok(_) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "REDIS_URL".to_string(),
                message: "URL must start with redis:// or rediss://".to_string(),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "REDIS_URL".to_string(),
                message: e.to_string(),
            }),
        }
        if config.redis.connect_timeout_ms == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "redis.connect_timeout_ms".to_string(),
            });
        }
    }

    fn validate_cache(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.cache.ttl_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "cache.ttl_secs".to_string(),
            });
        }
    }

    fn validate_telemetry(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let telemetry = &config.telemetry;
        if !(0.0..=1.0).contains(&telemetry.sampling_ratio) {
            errors.push(ConfigValidationError::InvalidSamplingRatio {
                value: telemetry.sampling_ratio,
            });
        }
        if let Some(endpoint) = &telemetry.otlp_endpoint {
            if let Err(e) = Url::parse(endpoint) {
                errors.push(ConfigValidationError::InvalidUrl {
                    url_type: "OTLP endpoint".to_string(),
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Validates the configuration, folding all problems into one `ConfigInvalid`.
pub fn validate_config(config: &AppConfig) -> ShopResult<()> {
    ConfigValidator::validate(config).map_err(|errors| {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        ShopError::config(message)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_ports_rejected() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.database.port = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| matches!(e, ConfigValidationError::InvalidPort { .. })));
    }

    #[test]
    fn test_empty_database_host_rejected() {
        let mut config = AppConfig::default();
        config.database.host = "  ".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ConfigValidationError::EmptyValue {
                name: "DB_HOST".to_string()
            }]
        );
    }

    #[test]
    fn test_redis_scheme_rejected() {
        let mut config = AppConfig::default();
        config.redis.url = "http://redis:6379".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(errors[0], ConfigValidationError::InvalidUrl { .. }));
    }

    #[test]
    fn test_rediss_scheme_accepted() {
        let mut config = AppConfig::default();
        config.redis.url = "rediss://cache.internal:6380".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_pool_bounds_rejected() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(ConfigValidator::validate(&config).is_err());

        config.database.max_connections = 5;
        config.database.min_connections = 10;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_sampling_ratio_bounds() {
        let mut config = AppConfig::default();
        config.telemetry.sampling_ratio = 1.5;
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ConfigValidationError::InvalidSamplingRatio { .. }
        ));
    }

    #[test]
    fn test_validate_config_folds_into_config_invalid() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.cache.ttl_secs = 0;

        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ShopError::ConfigInvalid(_)));
        let message = err.to_string();
        assert!(message.contains("PORT"));
        assert!(message.contains("cache.ttl_secs"));
    }
}
