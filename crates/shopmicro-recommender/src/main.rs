//! ShopMicro recommendation service.

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusBuilder;
use shopmicro_core::telemetry::DEFAULT_LOG_FILTER;
use shopmicro_recommender::{create_router, CatalogClient, RecommenderConfig, RecommenderState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = RecommenderConfig::from_env()?;
    let catalog = CatalogClient::new(config.products_url()?, config.backend_timeout)?;

    let metrics_handle = PrometheusBuilder::new()
        .add_global_label("app", "shopmicro-ml")
        .install_recorder()?;

    let router = create_router(RecommenderState {
        catalog: Arc::new(catalog),
        metrics_handle,
    });

    let listener = TcpListener::bind(config.addr()).await?;
    info!(addr = %config.addr(), backend_api = %config.backend_api, "Recommender listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Recommender stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
