//! Caching infrastructure for the service layer.
//!
//! This module provides a cache abstraction with a Redis implementation and a
//! typed lookup outcome used by the catalog read path.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface, CacheLookup, MissReason};
pub use redis_cache::{RedisCacheService, DEFAULT_TTL};
