//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use shopmicro_config::RedisConfig;
use shopmicro_core::{ShopError, ShopResult};
use std::time::Duration;
use tracing::{debug, info};

/// Default TTL for cached items.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

/// Redis-based cache service over one multiplexed connection.
///
/// The connection manager reconnects on its own after a broken connection;
/// commands issued while it is down fail with `CacheFault`.
#[derive(Clone)]
pub struct RedisCacheService {
    conn: ConnectionManager,
}

impl RedisCacheService {
    /// Opens the connection and verifies it with `PING`.
    ///
    /// Fails if the cache is unreachable, which keeps the server from
    /// accepting traffic without it.
    pub async fn connect(config: &RedisConfig) -> ShopResult<Self> {
        info!("Connecting to Redis...");

        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| ShopError::cache(format!("Invalid Redis URL: {e}")))?;

        let manager_config = ConnectionManagerConfig::new()
            .set_connection_timeout(config.connect_timeout())
            .set_response_timeout(config.response_timeout());

        let conn = ConnectionManager::new_with_config(client, manager_config)
            .await
            .map_err(|e| ShopError::cache(format!("Failed to connect to Redis: {e}")))?;

        let service = Self::new(conn);
        service.ping().await?;

        info!("Redis connection established");
        Ok(service)
    }

    /// Wraps an established connection manager.
    #[must_use]
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn get_raw(&self, key: &str) -> ShopResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| ShopError::cache(format!("Failed to get key '{key}': {e}")))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> ShopResult<()> {
        let mut conn = self.conn.clone();
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| ShopError::cache(format!("Failed to set key '{key}': {e}")))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn ping(&self) -> ShopResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService").finish_non_exhaustive()
    }
}
