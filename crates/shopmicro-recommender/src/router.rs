//! Recommendation service router.

use crate::catalog_client::CatalogClient;
use crate::picker;
use axum::{
    body::Body,
    extract::{MatchedPath, Path, State},
    http::{header, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use metrics::counter;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use shopmicro_core::{Recommendations, ShopError};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

/// Requests served, by route.
pub const REQUESTS_TOTAL: &str = "shopmicro_ml_requests_total";

/// Shared recommender state.
#[derive(Clone)]
pub struct RecommenderState {
    pub catalog: Arc<CatalogClient>,
    pub metrics_handle: PrometheusHandle,
}

#[derive(Debug, Serialize)]
struct ServiceHealth {
    status: &'static str,
    service: &'static str,
}

#[derive(Debug, Serialize)]
struct GeneratedRecommendations {
    recommendations: Vec<String>,
    source_count: usize,
}

/// Catalog fetch failure, rendered as 502.
struct BackendFailure(ShopError);

impl IntoResponse for BackendFailure {
    fn into_response(self) -> Response {
        warn!(error = %self.0, "Error fetching products");
        let body = failure_body(&self.0);
        (StatusCode::BAD_GATEWAY, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct BackendFailureBody {
    error: &'static str,
    detail: String,
}

fn failure_body(error: &ShopError) -> BackendFailureBody {
    let detail = match error {
        ShopError::UpstreamFault { message, .. } => message.clone(),
        other => other.to_string(),
    };
    BackendFailureBody {
        error: "failed_to_fetch_backend",
        detail,
    }
}

/// Creates the recommender router.
pub fn create_router(state: RecommenderState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/recommendations/:user_id", get(recommendations))
        .route("/recommendations_gen", get(recommendations_gen))
        .route("/metrics", get(render_metrics))
        .with_state(state)
        .layer(middleware::from_fn(count_requests))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn count_requests(request: Request<Body>, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());
    counter!(REQUESTS_TOTAL, "route" => route).increment(1);
    next.run(request).await
}

async fn health() -> Json<ServiceHealth> {
    Json(ServiceHealth {
        status: "ok",
        service: "ml-service",
    })
}

async fn recommendations(
    State(state): State<RecommenderState>,
    Path(user_id): Path<u32>,
) -> Result<Json<Recommendations>, BackendFailure> {
    let names = state.catalog.product_names().await.map_err(BackendFailure)?;
    Ok(Json(Recommendations::for_user(user_id, picker::pick(&names))))
}

async fn recommendations_gen(
    State(state): State<RecommenderState>,
) -> Result<Json<GeneratedRecommendations>, BackendFailure> {
    let names = state.catalog.product_names().await.map_err(BackendFailure)?;
    Ok(Json(GeneratedRecommendations {
        recommendations: picker::pick(&names),
        source_count: names.len(),
    }))
}

async fn render_metrics(State(state): State<RecommenderState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics_handle.render(),
    )
}
