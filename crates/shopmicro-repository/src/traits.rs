//! Repository trait definitions.

use async_trait::async_trait;
use shopmicro_core::{Product, ShopResult};

/// Read-only product store.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Returns every product ordered by id ascending.
    async fn find_all(&self) -> ShopResult<Vec<Product>>;

    /// Runs a trivial query to prove the store is reachable.
    async fn ping(&self) -> ShopResult<()>;
}
