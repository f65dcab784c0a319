//! Application context.

use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use shopmicro_config::AppConfig;
use shopmicro_core::ShopResult;
use shopmicro_repository::{create_pool, DatabasePool, PostgresProductRepository, ProductRepository};
use shopmicro_rest::{create_router, AppState};
use shopmicro_service::metrics::{install_prometheus, PrometheusCacheMetrics};
use shopmicro_service::{
    CacheInterface, CatalogService, CatalogServiceImpl, HealthService, HealthServiceImpl,
    RedisCacheService,
};
use std::sync::Arc;
use tracing::info;

/// Everything the backend shares between requests, built once at startup.
pub struct AppContext {
    pub config: AppConfig,
    pub pool: Arc<DatabasePool>,
    pub metrics_handle: PrometheusHandle,
    pub catalog_service: Arc<dyn CatalogService>,
    pub health_service: Arc<dyn HealthService>,
}

impl AppContext {
    /// Connects the dependencies and wires the services.
    ///
    /// The store pool connects lazily. The cache connection is established
    /// and verified here; failing to reach it aborts startup.
    pub async fn build(config: AppConfig) -> ShopResult<Self> {
        let pool = create_pool(&config.database);
        if config.database.run_migrations {
            pool.run_migrations().await?;
        }

        let cache = Arc::new(RedisCacheService::connect(&config.redis).await?);
        let metrics_handle = install_prometheus(&config.observability.app_label)?;

        Ok(Self::assemble(config, pool, cache, metrics_handle))
    }

    /// Wires services over already-constructed dependencies.
    pub fn assemble(
        config: AppConfig,
        pool: Arc<DatabasePool>,
        cache: Arc<dyn CacheInterface>,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        let repository: Arc<dyn ProductRepository> =
            Arc::new(PostgresProductRepository::new(Arc::clone(&pool)));

        let catalog_service: Arc<dyn CatalogService> = Arc::new(
            CatalogServiceImpl::new(
                Arc::clone(&repository),
                Arc::clone(&cache),
                Arc::new(PrometheusCacheMetrics),
            )
            .with_ttl(config.cache.ttl()),
        );
        let health_service: Arc<dyn HealthService> =
            Arc::new(HealthServiceImpl::new(repository, cache));

        info!(cache_ttl_secs = config.cache.ttl_secs, "Application context ready");

        Self {
            config,
            pool,
            metrics_handle,
            catalog_service,
            health_service,
        }
    }

    /// Builds the HTTP router over this context.
    #[must_use]
    pub fn router(&self) -> Router {
        let state = AppState::new(
            Arc::clone(&self.catalog_service),
            Arc::clone(&self.health_service),
            self.metrics_handle.clone(),
            self.config.app.name.as_str(),
        );
        create_router(state, &self.config.server, &self.config.observability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use shopmicro_config::DatabaseConfig;
    use shopmicro_service::testing::{detached_prometheus_handle, InMemoryCache};
    use tower::ServiceExt;

    fn context_without_store() -> AppContext {
        let mut config = AppConfig::default();
        config.database = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            connect_timeout_ms: 200,
            ..DatabaseConfig::default()
        };
        let pool = create_pool(&config.database);
        AppContext::assemble(
            config,
            pool,
            Arc::new(InMemoryCache::new()),
            detached_prometheus_handle(),
        )
    }

    #[tokio::test]
    async fn test_unreachable_store_reports_unhealthy() {
        let context = context_without_store();

        let response = context
            .router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "unhealthy");
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_product_listing() {
        let context = context_without_store();

        let response = context
            .router()
            .oneshot(Request::builder().uri("/products").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "backend_error");
    }
}
