//! Health service trait definition.

use async_trait::async_trait;
use serde::Serialize;

/// Result of probing the service's dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// True only when every probe succeeded.
    pub ok: bool,
    /// Message of the first failing probe.
    pub detail: Option<String>,
}

impl HealthReport {
    #[must_use]
    pub const fn healthy() -> Self {
        Self {
            ok: true,
            detail: None,
        }
    }

    #[must_use]
    pub fn unhealthy(detail: impl Into<String>) -> Self {
        Self {
            ok: false,
            detail: Some(detail.into()),
        }
    }
}

/// Readiness probe over the catalog store and the cache.
#[async_trait]
pub trait HealthService: Send + Sync {
    /// Probes the store, then the cache, stopping at the first failure.
    async fn check_health(&self) -> HealthReport;
}
