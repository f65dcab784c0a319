//! # ShopMicro Server
//!
//! Catalog backend: `/products` behind a read-through cache, `/health`, and
//! Prometheus metrics.

use shopmicro_config::{AppConfig, ConfigLoader};
use shopmicro_core::telemetry::{init_basic_tracing, init_telemetry, TelemetryConfig, TelemetryGuard};
use shopmicro_core::{ShopError, ShopResult};
use shopmicro_server::{startup, AppContext};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location().load() {
        Ok(config) => config,
        Err(e) => {
            let _ = init_basic_tracing(&TelemetryConfig::default());
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let telemetry = match init_telemetry(&config.telemetry) {
        Ok(guard) => guard,
        Err(e) => {
            let _ = init_basic_tracing(&config.telemetry);
            warn!(error = %e, "Telemetry initialization failed, continuing without export");
            TelemetryGuard::disabled()
        }
    };

    info!("Starting ShopMicro backend...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config, telemetry).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig, telemetry: TelemetryGuard) -> ShopResult<()> {
    let context = match AppContext::build(config).await {
        Ok(context) => context,
        Err(e) => {
            telemetry.shutdown();
            return Err(e);
        }
    };

    startup::spawn_metrics_upkeep(context.metrics_handle.clone());

    let addr = context.config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ShopError::internal(format!("Failed to bind {addr}: {e}")))?;

    startup::print_startup_info(&context.config);
    info!("Backend listening on port {}", context.config.server.port);

    let served = axum::serve(listener, context.router())
        .with_graceful_shutdown(startup::shutdown_signal())
        .await
        .map_err(|e| ShopError::internal(format!("Server error: {e}")));

    telemetry.shutdown();
    context.pool.close().await;

    info!("Server shutdown complete");
    served
}
