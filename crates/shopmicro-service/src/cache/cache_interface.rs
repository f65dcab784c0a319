//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shopmicro_core::{ShopError, ShopResult};
use std::time::Duration;

/// Cache interface for storing and retrieving cached data.
///
/// Values are JSON strings so the trait stays dyn-compatible.
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> ShopResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> ShopResult<()>;

    /// Round-trip a no-op command to verify the connection.
    async fn ping(&self) -> ShopResult<()>;
}

/// Why a lookup did not produce a value.
#[derive(Debug)]
pub enum MissReason {
    /// No entry under the key, or it expired.
    Absent,
    /// The cache could not be reached or answered with an error.
    Fault(ShopError),
    /// An entry exists but does not decode as the requested type.
    Corrupt(serde_json::Error),
}

/// Outcome of a fail-open cache lookup.
#[derive(Debug)]
pub enum CacheLookup<T> {
    /// A decoded value.
    Hit(T),
    /// No usable value; the caller falls back to the source of truth.
    Miss(MissReason),
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Looks up and decodes a value. Never fails: faults and undecodable
    /// entries come back as misses carrying their cause.
    async fn lookup<T: DeserializeOwned + Send>(&self, key: &str) -> CacheLookup<T> {
        match self.get_raw(key).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => CacheLookup::Hit(value),
                Err(e) => CacheLookup::Miss(MissReason::Corrupt(e)),
            },
            Ok(None) => CacheLookup::Miss(MissReason::Absent),
            Err(e) => CacheLookup::Miss(MissReason::Fault(e)),
        }
    }

    /// Serializes a value and writes it in one command.
    async fn store<T: Serialize + Send + Sync + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> ShopResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

impl<T: CacheInterface + ?Sized> CacheExt for T {}
