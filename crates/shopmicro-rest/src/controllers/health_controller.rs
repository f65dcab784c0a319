//! Health check controller.

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum HealthResponse {
    Healthy {
        status: &'static str,
        service: String,
        /// Milliseconds since the Unix epoch.
        timestamp: i64,
    },
    Unhealthy {
        status: &'static str,
        error: String,
    },
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Probes the store and the cache; 503 when either fails.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let report = state.health_service.check_health().await;

    if report.ok {
        Json(HealthResponse::Healthy {
            status: "ok",
            service: state.service_name.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
        .into_response()
    } else {
        let body = HealthResponse::Unhealthy {
            status: "unhealthy",
            error: report.detail.unwrap_or_default(),
        };
        (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
    }
}
