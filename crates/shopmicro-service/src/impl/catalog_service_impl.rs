//! Cache-aside catalog service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface, CacheLookup, MissReason, DEFAULT_TTL};
use crate::catalog_service::CatalogService;
use crate::metrics::CacheMetrics;
use async_trait::async_trait;
use shopmicro_core::{Product, ShopResult};
use shopmicro_repository::ProductRepository;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Catalog service reading through a single-entry cache.
///
/// A lookup happens before the store read, which happens before the cache
/// write. Concurrent misses may both repopulate the entry; the last write wins
/// and both carry a complete store result.
pub struct CatalogServiceImpl {
    repository: Arc<dyn ProductRepository>,
    cache: Arc<dyn CacheInterface>,
    metrics: Arc<dyn CacheMetrics>,
    ttl: Duration,
}

impl CatalogServiceImpl {
    /// Creates a catalog service with the default 30 second TTL.
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        cache: Arc<dyn CacheInterface>,
        metrics: Arc<dyn CacheMetrics>,
    ) -> Self {
        Self {
            repository,
            cache,
            metrics,
            ttl: DEFAULT_TTL,
        }
    }

    /// Overrides the cache entry TTL.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    async fn populate(&self, products: &[Product]) {
        if let Err(e) = self
            .cache
            .store(cache_keys::PRODUCTS_ALL, products, self.ttl)
            .await
        {
            self.metrics.record_write_failure();
            warn!(error = %e, key = cache_keys::PRODUCTS_ALL, "Cache write failed");
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn list_products(&self) -> ShopResult<Vec<Product>> {
        match self
            .cache
            .lookup::<Vec<Product>>(cache_keys::PRODUCTS_ALL)
            .await
        {
            CacheLookup::Hit(products) => {
                self.metrics.record_hit();
                debug!(count = products.len(), "Serving products from cache");
                return Ok(products);
            }
            CacheLookup::Miss(MissReason::Absent) => {
                debug!("Products not cached");
            }
            CacheLookup::Miss(MissReason::Fault(e)) => {
                warn!(error = %e, "Cache lookup failed, reading from store");
            }
            CacheLookup::Miss(MissReason::Corrupt(e)) => {
                warn!(error = %e, "Cached products are unreadable, reading from store");
            }
        }
        self.metrics.record_miss();

        let products = self.repository.find_all().await?;
        self.populate(&products).await;

        Ok(products)
    }
}
