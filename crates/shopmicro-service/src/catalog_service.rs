//! Catalog service trait definition.

use async_trait::async_trait;
use shopmicro_core::{Product, ShopResult};

/// Product listing behind a read-through cache.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Lists all products ordered by id.
    ///
    /// Only store failures surface (`StoreUnavailable`); cache failures are
    /// absorbed.
    async fn list_products(&self) -> ShopResult<Vec<Product>>;
}
