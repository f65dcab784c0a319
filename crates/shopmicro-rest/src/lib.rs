//! # ShopMicro REST
//!
//! HTTP surface of the catalog backend: product listing, dependency health,
//! and Prometheus exposition.

pub mod controllers;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
