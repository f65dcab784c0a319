//! # ShopMicro Repository
//!
//! Read-only access to the catalog store.
//!
//! ```text
//! CatalogService
//!   ↓  Arc<dyn ProductRepository>   (store interface)
//! PostgresProductRepository         (SQLx queries)
//!   ↓  Arc<DatabasePool>            (bounded PgPool)
//! PostgreSQL
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
