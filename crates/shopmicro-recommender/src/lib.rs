//! # ShopMicro Recommender
//!
//! Recommendation service backing the storefront: picks up to three random
//! product names from the catalog service for a user.

pub mod catalog_client;
pub mod config;
pub mod picker;
pub mod router;

pub use catalog_client::CatalogClient;
pub use config::RecommenderConfig;
pub use router::{create_router, RecommenderState};
