//! Database connection pool management.

use shopmicro_config::DatabaseConfig;
use shopmicro_core::{ShopError, ShopResult};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{info, warn};

/// Bounded PostgreSQL connection pool.
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Creates a pool without opening any connection.
    ///
    /// Connections are opened on first use, so an unreachable store does not
    /// keep the process from starting; `/health` reports it instead.
    #[must_use]
    pub fn lazy(config: &DatabaseConfig) -> Self {
        let pool = pool_options(config).connect_lazy_with(connect_options(config));
        info!(
            host = %config.host,
            database = %config.name,
            max_connections = config.max_connections,
            "PostgreSQL connection pool configured"
        );
        Self { pool }
    }

    /// Creates a pool and opens the minimum number of connections.
    pub async fn connect(config: &DatabaseConfig) -> ShopResult<Self> {
        info!("Connecting to PostgreSQL database...");

        let pool = pool_options(config)
            .connect_with(connect_options(config))
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                ShopError::store(format!("Failed to connect: {e}"))
            })?;

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn inner(&self) -> &PgPool {
        &self.pool
    }

    /// Checks if the database connection is healthy.
    pub async fn health_check(&self) -> ShopResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Runs database migrations.
    pub async fn run_migrations(&self) -> ShopResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ShopError::store(format!("Migration failed: {e}")))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Closes the database pool.
    pub async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout())
        .idle_timeout(Some(config.idle_timeout()))
}

fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

/// Creates a shared lazily-connecting database pool.
#[must_use]
pub fn create_pool(config: &DatabaseConfig) -> std::sync::Arc<DatabasePool> {
    std::sync::Arc::new(DatabasePool::lazy(config))
}
