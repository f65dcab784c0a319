//! Main application router.

use crate::{
    controllers::{health_controller, metrics_controller, product_controller},
    middleware::track_request,
    state::AppState,
};
use axum::{http::StatusCode, middleware, Router};
use shopmicro_config::{ObservabilityConfig, ServerConfig};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// Creates the main application router.
pub fn create_router(
    state: AppState,
    server_config: &ServerConfig,
    observability: &ObservabilityConfig,
) -> Router {
    let router = Router::new()
        .merge(health_controller::router())
        .merge(metrics_controller::router(&observability.metrics_path))
        .merge(product_controller::router())
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            server_config.request_timeout(),
        ))
        .layer(middleware::from_fn(track_request))
        .layer(create_cors_layer(server_config))
        .layer(TraceLayer::new_for_http());

    info!(
        metrics_path = %observability.metrics_path,
        "Router created with /health, /products and metrics endpoints"
    );
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    }
}
