//! Recommender router tests against a mock catalog service.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use shopmicro_recommender::{create_router, CatalogClient, RecommenderState};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(products_url: String) -> Router {
    let catalog = CatalogClient::new(products_url, Duration::from_secs(2)).unwrap();
    create_router(RecommenderState {
        catalog: Arc::new(catalog),
        metrics_handle: PrometheusBuilder::new().build_recorder().handle(),
    })
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn catalog_with(names: &[&str]) -> MockServer {
    let server = MockServer::start().await;
    let products: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({"id": i + 1, "name": name, "price": "1.00"}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app("http://127.0.0.1:1/products".to_string()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "service": "ml-service"}));
}

#[tokio::test]
async fn test_recommendations_pick_three_catalog_names() {
    let catalog = catalog_with(&["Laptop", "Headphones", "Keyboard", "Mouse", "Monitor"]).await;
    let router = app(format!("{}/products", catalog.uri()));

    let (status, body) = get(router, "/recommendations/42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], 42);
    let picks = body["recommendations"].as_array().unwrap();
    assert_eq!(picks.len(), 3);
    let known = ["Laptop", "Headphones", "Keyboard", "Mouse", "Monitor"];
    assert!(picks.iter().all(|p| known.contains(&p.as_str().unwrap())));
}

#[tokio::test]
async fn test_small_catalog_yields_fewer_picks() {
    let catalog = catalog_with(&["Widget"]).await;
    let router = app(format!("{}/products", catalog.uri()));

    let (_, body) = get(router, "/recommendations/7").await;

    assert_eq!(body["recommendations"], json!(["Widget"]));
}

#[tokio::test]
async fn test_generated_recommendations_report_source_count() {
    let catalog = catalog_with(&["A", "B", "C", "D"]).await;
    let router = app(format!("{}/products", catalog.uri()));

    let (status, body) = get(router, "/recommendations_gen").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source_count"], 4);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_entries_without_name_are_skipped() {
    let catalog = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Laptop", "price": "999.99"},
            {"id": 2, "price": "5.00"},
            {"id": 3, "name": null, "price": "1.00"},
            {"id": 4, "name": "Mouse", "price": "24.99"}
        ])))
        .mount(&catalog)
        .await;
    let router = app(format!("{}/products", catalog.uri()));

    let (status, body) = get(router, "/recommendations_gen").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source_count"], 2);
    let mut picks: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    picks.sort_unstable();
    assert_eq!(picks, vec!["Laptop", "Mouse"]);
}

#[tokio::test]
async fn test_backend_failure_is_bad_gateway() {
    let catalog = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&catalog)
        .await;
    let router = app(format!("{}/products", catalog.uri()));

    let (status, body) = get(router, "/recommendations/42").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "failed_to_fetch_backend");
    assert!(body["detail"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn test_unreachable_backend_is_bad_gateway() {
    let router = app("http://127.0.0.1:1/products".to_string());

    let (status, body) = get(router, "/recommendations_gen").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "failed_to_fetch_backend");
}

#[tokio::test]
async fn test_metrics_content_type() {
    let router = app("http://127.0.0.1:1/products".to_string());

    let response = router
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; version=0.0.4"
    );
}
