//! # ShopMicro Service
//!
//! The catalog read path and its collaborators: the cache abstraction and its
//! Redis implementation, cache-aside product listing, dependency health
//! probes, and Prometheus metrics.

pub mod cache;
pub mod catalog_service;
pub mod health_service;
pub mod r#impl;
pub mod metrics;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use cache::*;
pub use catalog_service::*;
pub use health_service::*;
pub use r#impl::*;
