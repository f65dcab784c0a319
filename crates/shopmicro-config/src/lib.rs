//! # ShopMicro Config
//!
//! Configuration management for ShopMicro.
//! Supports layered configuration from TOML files, `SHOPMICRO__` prefixed
//! environment variables, and the flat container variables (`DB_HOST`,
//! `REDIS_URL`, `PORT`, ...) used by the deployment manifests.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::validate_config;

pub use shopmicro_core::telemetry::{LogFormat, TelemetryConfig};
