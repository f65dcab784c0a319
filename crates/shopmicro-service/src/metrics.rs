//! Prometheus metrics for the catalog backend.
//!
//! Counters and histograms are recorded through the `metrics` facade; the
//! recorder installed at startup renders them in Prometheus text format.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use shopmicro_core::{ShopError, ShopResult};
use std::time::Duration;
use tracing::info;

/// Metric names.
pub mod names {
    /// Cache lookups by outcome (`type` = `hit` | `miss`).
    pub const CACHE_OPERATIONS_TOTAL: &str = "cache_operations_total";
    /// Cache writes that failed after a store read.
    pub const CACHE_WRITE_FAILURES_TOTAL: &str = "cache_write_failures_total";
    /// HTTP request latency by method, matched route, and status.
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
}

/// Latency buckets in seconds.
const HTTP_DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::CACHE_OPERATIONS_TOTAL,
        "Cache operations (hit or miss)"
    );
    describe_counter!(
        names::CACHE_WRITE_FAILURES_TOTAL,
        "Cache writes that failed and were skipped"
    );
    describe_histogram!(
        names::HTTP_REQUEST_DURATION_SECONDS,
        "HTTP request duration in seconds"
    );
}

/// Builds the Prometheus recorder configuration with the `app` default label.
pub fn prometheus_builder(app_label: &str) -> ShopResult<PrometheusBuilder> {
    PrometheusBuilder::new()
        .add_global_label("app", app_label)
        .set_buckets_for_metric(
            Matcher::Full(names::HTTP_REQUEST_DURATION_SECONDS.to_string()),
            HTTP_DURATION_BUCKETS,
        )
        .map_err(|e| ShopError::internal(format!("Invalid histogram buckets: {e}")))
}

/// Installs the process-wide recorder and returns the handle used to render
/// `/metrics`.
pub fn install_prometheus(app_label: &str) -> ShopResult<PrometheusHandle> {
    let handle = prometheus_builder(app_label)?
        .install_recorder()
        .map_err(|e| ShopError::internal(format!("Failed to install Prometheus recorder: {e}")))?;

    register_metrics();
    info!(app = app_label, "Prometheus metrics initialized");
    Ok(handle)
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, route: &str, status: u16, duration: Duration) {
    histogram!(
        names::HTTP_REQUEST_DURATION_SECONDS,
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Hit/miss accounting for the catalog cache.
pub trait CacheMetrics: Send + Sync {
    /// A lookup returned a usable value.
    fn record_hit(&self);
    /// A lookup fell through to the store.
    fn record_miss(&self);
    /// Populating the cache after a store read failed.
    fn record_write_failure(&self);
}

/// Cache metrics recorded into the global Prometheus recorder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrometheusCacheMetrics;

impl CacheMetrics for PrometheusCacheMetrics {
    fn record_hit(&self) {
        counter!(names::CACHE_OPERATIONS_TOTAL, "type" => "hit").increment(1);
    }

    fn record_miss(&self) {
        counter!(names::CACHE_OPERATIONS_TOTAL, "type" => "miss").increment(1);
    }

    fn record_write_failure(&self) {
        counter!(names::CACHE_WRITE_FAILURES_TOTAL).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample<'a>(rendered: &'a str, name: &str, label: &str) -> Option<&'a str> {
        rendered
            .lines()
            .filter(|line| line.starts_with(name) && line.contains(label))
            .find_map(|line| line.rsplit(' ').next())
    }

    #[test]
    fn test_cache_counters_render_with_type_and_app_labels() {
        let recorder = prometheus_builder("shopmicro-backend").unwrap().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            let metrics = PrometheusCacheMetrics;
            metrics.record_miss();
            metrics.record_hit();
            metrics.record_hit();
        });

        let rendered = handle.render();
        assert_eq!(sample(&rendered, "cache_operations_total", r#"type="hit""#), Some("2"));
        assert_eq!(sample(&rendered, "cache_operations_total", r#"type="miss""#), Some("1"));
        assert!(rendered.contains(r#"app="shopmicro-backend""#));
    }

    #[test]
    fn test_write_failures_use_separate_counter() {
        let recorder = prometheus_builder("shopmicro-backend").unwrap().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            PrometheusCacheMetrics.record_write_failure();
        });

        let rendered = handle.render();
        assert!(rendered.contains("cache_write_failures_total"));
        assert!(!rendered.contains("cache_operations_total"));
    }

    #[test]
    fn test_http_histogram_uses_buckets() {
        let recorder = prometheus_builder("shopmicro-backend").unwrap().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_http_request("GET", "/products", 200, Duration::from_millis(12));
        });

        let rendered = handle.render();
        assert!(rendered.contains("http_request_duration_seconds_bucket"));
        assert!(rendered.contains(r#"route="/products""#));
        assert!(rendered.contains(r#"status="200""#));
    }
}
