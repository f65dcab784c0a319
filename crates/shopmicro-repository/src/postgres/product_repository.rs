//! PostgreSQL product repository implementation.

use crate::{traits::ProductRepository, DatabasePool};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use shopmicro_core::{Product, ShopError, ShopResult};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

// `price` is read as text: the binary NUMERIC decode drops the column scale
// ("79.00" would come back as "79").
const SELECT_ALL_PRODUCTS: &str =
    "SELECT id, name, price::text AS price FROM products ORDER BY id";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    price: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = ShopError;

    fn try_from(row: ProductRow) -> ShopResult<Self> {
        let price = BigDecimal::from_str(&row.price).map_err(|e| {
            ShopError::store(format!("Invalid price '{}' for product {}: {e}", row.price, row.id))
        })?;
        Ok(Product::new(row.id, row.name, price))
    }
}

/// PostgreSQL product repository implementation.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: Arc<DatabasePool>,
}

impl PostgresProductRepository {
    /// Creates a new PostgreSQL product repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_all(&self) -> ShopResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(SELECT_ALL_PRODUCTS)
            .fetch_all(self.pool.inner())
            .await?;

        let products = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<ShopResult<Vec<_>>>()?;

        debug!(count = products.len(), "Loaded products from store");
        Ok(products)
    }

    async fn ping(&self) -> ShopResult<()> {
        self.pool.health_check().await
    }
}
