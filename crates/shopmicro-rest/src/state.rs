//! Application state for Axum handlers.

use metrics_exporter_prometheus::PrometheusHandle;
use shopmicro_service::{CatalogService, HealthService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<dyn CatalogService>,
    pub health_service: Arc<dyn HealthService>,
    pub metrics_handle: PrometheusHandle,
    /// Name reported by `/health`.
    pub service_name: Arc<str>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        catalog_service: Arc<dyn CatalogService>,
        health_service: Arc<dyn HealthService>,
        metrics_handle: PrometheusHandle,
        service_name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            catalog_service,
            health_service,
            metrics_handle,
            service_name: service_name.into(),
        }
    }
}
