//! Per-request latency recording and access logging.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use shopmicro_service::metrics::record_http_request;
use std::time::Instant;
use tracing::{info, warn};

/// Records `http_request_duration_seconds{method,route,status}` and logs the
/// completed request under the same `route` label.
///
/// `route` is the matched route template, or the raw path when nothing matched.
pub async fn track_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path().to_string(), |p| p.as_str().to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    let status = response.status();
    record_http_request(&method, &route, status.as_u16(), elapsed);

    if status.is_server_error() {
        warn!(
            target: "http",
            method = %method,
            route = %route,
            status = status.as_u16(),
            duration_ms = %elapsed.as_millis(),
            "Request failed"
        );
    } else {
        info!(
            target: "http",
            method = %method,
            route = %route,
            status = status.as_u16(),
            duration_ms = %elapsed.as_millis(),
            "Request completed"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use shopmicro_service::metrics::prometheus_builder;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/items/:id", get(|| async { "ok" }))
            .layer(middleware::from_fn(track_request))
    }

    async fn send(router: Router, uri: &str) {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_route_label_uses_template() {
        let recorder = prometheus_builder("test").unwrap().build_recorder();
        let handle = recorder.handle();
        let _guard = metrics::set_default_local_recorder(&recorder);

        send(app(), "/items/17").await;

        let rendered = handle.render();
        assert!(rendered.contains(r#"route="/items/:id""#));
        assert!(!rendered.contains("/items/17"));
        assert!(rendered.contains(r#"method="GET""#));
        assert!(rendered.contains(r#"status="200""#));
    }

    #[tokio::test]
    async fn test_unmatched_path_falls_back_to_raw_path() {
        let recorder = prometheus_builder("test").unwrap().build_recorder();
        let handle = recorder.handle();
        let _guard = metrics::set_default_local_recorder(&recorder);

        send(app(), "/missing").await;

        let rendered = handle.render();
        assert!(rendered.contains(r#"route="/missing""#));
        assert!(rendered.contains(r#"status="404""#));
    }
}
