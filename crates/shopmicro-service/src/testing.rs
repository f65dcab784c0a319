//! In-memory doubles for the cache, the catalog store, and cache metrics.
//!
//! Available to this crate's tests and, through the `testing` feature, to the
//! tests of downstream crates. Expiry uses `tokio::time::Instant`, so a paused
//! test clock drives TTLs.

use crate::cache::CacheInterface;
use crate::metrics::CacheMetrics;
use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use shopmicro_core::{Product, ShopError, ShopResult};
use shopmicro_repository::ProductRepository;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// TTL-aware in-memory cache with switchable faults.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryCache {
    /// Creates an empty, healthy cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every command fail (`true`) or succeed (`false`).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.set_fail_reads(unavailable);
        self.set_fail_writes(unavailable);
    }

    /// Makes `get_raw` and `ping` fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes `set_raw` fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Stores a raw value, e.g. a corrupted payload, bypassing fault injection.
    pub fn insert_raw(&self, key: &str, value: &str, ttl: Duration) {
        lock(&self.entries).insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
    }

    /// Returns the live value under `key`.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        lock(&self.entries)
            .get(key)
            .filter(|(_, expires_at)| Instant::now() < *expires_at)
            .map(|(value, _)| value.clone())
    }

    /// Number of successful writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> ShopResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ShopError::cache("connection refused"));
        }
        let mut entries = lock(&self.entries);
        match entries.get(key) {
            Some((_, expires_at)) if Instant::now() >= *expires_at => {
                entries.remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> ShopResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ShopError::cache("write rejected"));
        }
        self.insert_raw(key, value, ttl);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn ping(&self) -> ShopResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ShopError::cache("connection refused"));
        }
        Ok(())
    }
}

/// Product store double that counts queries.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Vec<Product>,
    queries: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryProductRepository {
    /// Creates a store holding `products`.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// Makes queries and pings fail with `StoreUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `find_all` calls, failed ones included.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ShopResult<Vec<Product>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ShopError::store("connection to server was lost"));
        }
        let mut products = self.products.clone();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn ping(&self) -> ShopResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ShopError::store("connection refused"));
        }
        Ok(())
    }
}

/// Cache metrics double with readable counters.
#[derive(Debug, Default)]
pub struct RecordingMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    write_failures: AtomicU64,
}

impl RecordingMetrics {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::SeqCst)
    }
}

impl CacheMetrics for RecordingMetrics {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::SeqCst);
    }

    fn record_write_failure(&self) {
        self.write_failures.fetch_add(1, Ordering::SeqCst);
    }
}

/// A Prometheus handle backed by a recorder that is not installed globally.
#[must_use]
pub fn detached_prometheus_handle() -> PrometheusHandle {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .build_recorder()
        .handle()
}
