//! Telemetry module for logging, OpenTelemetry tracing, and OTLP metrics.
//!
//! Initialization is an explicit fallible step: [`init_telemetry`] returns a
//! [`TelemetryGuard`] on success and the caller decides what to do on error
//! (the server logs the error, falls back to [`init_basic_tracing`], and keeps
//! starting). The guard flushes both providers on [`TelemetryGuard::shutdown`].

#[cfg(feature = "telemetry")]
use opentelemetry::trace::TracerProvider as _;
#[cfg(feature = "telemetry")]
use opentelemetry::KeyValue;
#[cfg(feature = "telemetry")]
use opentelemetry_otlp::WithExportConfig;
#[cfg(feature = "telemetry")]
use opentelemetry_sdk::{
    metrics::{PeriodicReader, SdkMeterProvider},
    runtime,
    trace::{RandomIdGenerator, Sampler, Tracer, TracerProvider as SdkTracerProvider},
    Resource,
};
#[cfg(feature = "telemetry")]
use opentelemetry_semantic_conventions::resource::SERVICE_NAME;
#[cfg(feature = "telemetry")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::ShopResult;
#[cfg(feature = "telemetry")]
use crate::ShopError;
use serde::{Deserialize, Serialize};

/// Default `EnvFilter` directive when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,shopmicro=debug,tower_http=debug";

/// Console log format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether OTLP export is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Service name for the OpenTelemetry resource.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// OTLP gRPC collector endpoint.
    #[serde(default = "default_otlp_endpoint")]
    pub otlp_endpoint: Option<String>,

    /// Sampling ratio (0.0 to 1.0).
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,

    /// Interval between OTLP metric exports in seconds.
    #[serde(default = "default_metric_export_interval_secs")]
    pub metric_export_interval_secs: u64,

    /// Whether to write log events to stdout.
    #[serde(default = "default_console_output")]
    pub console_output: bool,

    /// Format of console log events.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_enabled() -> bool {
    true
}

fn default_service_name() -> String {
    "shopmicro-backend".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_otlp_endpoint() -> Option<String> {
    Some("http://localhost:4317".to_string())
}

fn default_sampling_ratio() -> f64 {
    1.0
}

fn default_metric_export_interval_secs() -> u64 {
    60
}

fn default_console_output() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            service_name: default_service_name(),
            otlp_endpoint: default_otlp_endpoint(),
            sampling_ratio: default_sampling_ratio(),
            metric_export_interval_secs: default_metric_export_interval_secs(),
            console_output: default_console_output(),
            log_format: LogFormat::default(),
        }
    }
}

/// Handle on the installed OpenTelemetry providers.
///
/// Dropping the guard does not flush; call [`TelemetryGuard::shutdown`] on the
/// way out so batched spans and the last metric interval reach the collector.
#[derive(Default)]
pub struct TelemetryGuard {
    #[cfg(feature = "telemetry")]
    tracer_provider: Option<SdkTracerProvider>,
    #[cfg(feature = "telemetry")]
    meter_provider: Option<SdkMeterProvider>,
}

impl TelemetryGuard {
    /// A guard with nothing to flush.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Returns `true` if OTLP export is active.
    #[must_use]
    pub fn is_exporting(&self) -> bool {
        #[cfg(feature = "telemetry")]
        {
            self.tracer_provider.is_some() || self.meter_provider.is_some()
        }
        #[cfg(not(feature = "telemetry"))]
        {
            false
        }
    }

    /// Flushes and shuts down the providers.
    pub fn shutdown(self) {
        #[cfg(feature = "telemetry")]
        {
            if let Some(provider) = self.tracer_provider {
                if let Err(e) = provider.shutdown() {
                    tracing::warn!(error = %e, "Error terminating tracing");
                }
            }
            if let Some(provider) = self.meter_provider {
                if let Err(e) = provider.shutdown() {
                    tracing::warn!(error = %e, "Error terminating metric export");
                }
            }
            tracing::info!("Telemetry shutdown complete");
        }
    }
}

impl std::fmt::Debug for TelemetryGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryGuard")
            .field("exporting", &self.is_exporting())
            .finish()
    }
}

/// Initialize telemetry with the given configuration.
///
/// This sets up:
/// - OpenTelemetry tracer provider with OTLP batch exporter
/// - OpenTelemetry meter provider with a periodic OTLP reader
/// - tracing subscriber with the OpenTelemetry layer and console output
///
/// Nothing global is installed unless every exporter was built, so on error
/// the caller can still fall back to [`init_basic_tracing`].
#[cfg(feature = "telemetry")]
pub fn init_telemetry(config: &TelemetryConfig) -> ShopResult<TelemetryGuard> {
    if !config.enabled {
        init_basic_tracing(config)?;
        return Ok(TelemetryGuard::disabled());
    }

    let sampler = if config.sampling_ratio >= 1.0 {
        Sampler::AlwaysOn
    } else if config.sampling_ratio <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(config.sampling_ratio)
    };

    let resource = Resource::new(vec![KeyValue::new(SERVICE_NAME, config.service_name.clone())]);

    let (tracer_provider, meter_provider) = if let Some(endpoint) = &config.otlp_endpoint {
        let span_exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()
            .map_err(|e| ShopError::internal(format!("Failed to create OTLP span exporter: {e}")))?;

        let metric_exporter = opentelemetry_otlp::MetricExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()
            .map_err(|e| {
                ShopError::internal(format!("Failed to create OTLP metric exporter: {e}"))
            })?;

        let tracer_provider = SdkTracerProvider::builder()
            .with_batch_exporter(span_exporter, runtime::Tokio)
            .with_sampler(sampler)
            .with_id_generator(RandomIdGenerator::default())
            .with_resource(resource.clone())
            .build();

        let reader = PeriodicReader::builder(metric_exporter, runtime::Tokio)
            .with_interval(std::time::Duration::from_secs(
                config.metric_export_interval_secs.max(1),
            ))
            .build();

        let meter_provider = SdkMeterProvider::builder()
            .with_reader(reader)
            .with_resource(resource)
            .build();

        (tracer_provider, Some(meter_provider))
    } else {
        let tracer_provider = SdkTracerProvider::builder()
            .with_sampler(sampler)
            .with_id_generator(RandomIdGenerator::default())
            .with_resource(resource)
            .build();
        (tracer_provider, None)
    };

    let tracer = tracer_provider.tracer("shopmicro");
    install_subscriber(config, Some(tracer))?;

    opentelemetry::global::set_tracer_provider(tracer_provider.clone());
    if let Some(provider) = &meter_provider {
        opentelemetry::global::set_meter_provider(provider.clone());
    }

    tracing::info!(
        service_name = %config.service_name,
        sampling_ratio = %config.sampling_ratio,
        otlp_endpoint = ?config.otlp_endpoint,
        "OpenTelemetry SDK started"
    );

    Ok(TelemetryGuard {
        tracer_provider: Some(tracer_provider),
        meter_provider,
    })
}

/// Initialize console tracing without OpenTelemetry.
#[cfg(feature = "telemetry")]
pub fn init_basic_tracing(config: &TelemetryConfig) -> ShopResult<()> {
    install_subscriber(config, None)
}

#[cfg(feature = "telemetry")]
fn install_subscriber(config: &TelemetryConfig, tracer: Option<Tracer>) -> ShopResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let fmt_layer = match (config.console_output, config.log_format) {
        (false, _) => None,
        (true, LogFormat::Json) => Some(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .boxed(),
        ),
        (true, LogFormat::Pretty) => {
            Some(tracing_subscriber::fmt::layer().with_target(true).boxed())
        }
    };

    let otel_layer = tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| ShopError::internal(format!("Failed to install tracing subscriber: {e}")))
}

/// Placeholder for when telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_telemetry(_config: &TelemetryConfig) -> ShopResult<TelemetryGuard> {
    Ok(TelemetryGuard::disabled())
}

/// Placeholder for when telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_basic_tracing(_config: &TelemetryConfig) -> ShopResult<()> {
    Ok(())
}
