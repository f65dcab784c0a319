//! Dependency health probe implementation.

use crate::cache::CacheInterface;
use crate::health_service::{HealthReport, HealthService};
use async_trait::async_trait;
use shopmicro_repository::ProductRepository;
use std::sync::Arc;
use tracing::warn;

/// Health service probing the store with `SELECT 1` and the cache with `PING`.
pub struct HealthServiceImpl {
    repository: Arc<dyn ProductRepository>,
    cache: Arc<dyn CacheInterface>,
}

impl HealthServiceImpl {
    /// Creates a new health service.
    pub fn new(repository: Arc<dyn ProductRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self { repository, cache }
    }
}

#[async_trait]
impl HealthService for HealthServiceImpl {
    async fn check_health(&self) -> HealthReport {
        if let Err(e) = self.repository.ping().await {
            warn!(error = %e, "Store health probe failed");
            return HealthReport::unhealthy(e.to_string());
        }
        if let Err(e) = self.cache.ping().await {
            warn!(error = %e, "Cache health probe failed");
            return HealthReport::unhealthy(e.to_string());
        }
        HealthReport::healthy()
    }
}
