//! Configuration loader with layered sources.

use crate::{validate_config, AppConfig};
use config::{Config, ConfigError, Environment, File};
use shopmicro_core::{ShopError, ShopResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Flat container variables and the configuration keys they override.
pub const LEGACY_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DB_HOST", "database.host"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
    ("DB_PORT", "database.port"),
    ("REDIS_URL", "redis.url"),
    ("PORT", "server.port"),
    ("OTEL_EXPORTER_OTLP_ENDPOINT", "telemetry.otlp_endpoint"),
];

/// Configuration loader.
///
/// Sources are applied in order, later ones winning:
/// 1. `{dir}/default.toml`
/// 2. `{dir}/{environment}.toml` (`SHOPMICRO_ENVIRONMENT`, default `development`)
/// 3. `{dir}/local.toml`
/// 4. Environment variables with the `SHOPMICRO__` prefix (`SHOPMICRO__SERVER__PORT`)
/// 5. The flat variables in [`LEGACY_ENV_OVERRIDES`]
///
/// Every file is optional; with no sources at all the container defaults apply.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a loader reading files from `config_dir`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Creates a loader for the default location (`./config`).
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Loads configuration using the process environment (after `.env`).
    pub fn load(&self) -> ShopResult<AppConfig> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }
        self.load_from_env(std::env::vars().collect())
    }

    /// Loads configuration using an explicit environment snapshot.
    pub fn load_from_env(&self, env: HashMap<String, String>) -> ShopResult<AppConfig> {
        let environment = env
            .get("SHOPMICRO_ENVIRONMENT")
            .cloned()
            .unwrap_or_else(|| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{name}.toml"));
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        let prefixed: HashMap<String, String> = env
            .iter()
            .filter(|(key, _)| key.starts_with("SHOPMICRO__"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        builder = builder.add_source(
            Environment::with_prefix("SHOPMICRO")
                .separator("__")
                .try_parsing(true)
                .source(Some(prefixed)),
        );

        for (var, key) in LEGACY_ENV_OVERRIDES {
            let value = env.get(*var).filter(|v| !v.is_empty()).cloned();
            builder = builder
                .set_override_option(*key, value)
                .map_err(config_error_to_shop_error)?;
        }

        let mut app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error_to_shop_error)?;
        app_config.app.environment = environment;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_default_location()
    }
}

fn config_error_to_shop_error(err: ConfigError) -> ShopError {
    ShopError::config(err.to_string())
}
