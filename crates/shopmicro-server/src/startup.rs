//! Server startup and shutdown utilities.

use metrics_exporter_prometheus::PrometheusHandle;
use shopmicro_config::AppConfig;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

/// Histogram maintenance interval for the Prometheus recorder.
const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Backend:   http://{}", config.server.addr());
    info!("Health:    http://{}/health", config.server.addr());
    info!("Products:  http://{}/products", config.server.addr());
    info!(
        "Metrics:   http://{}{}",
        config.server.addr(),
        config.observability.metrics_path
    );
    info!("{}", separator);
}

/// Runs recorder upkeep in the background for the life of the process.
pub fn spawn_metrics_upkeep(handle: PrometheusHandle) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(METRICS_UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            handle.run_upkeep();
        }
    })
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_startup_info_does_not_panic() {
        print_startup_info(&AppConfig::default());
    }

    #[tokio::test]
    async fn test_metrics_upkeep_task_keeps_running() {
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder()
            .handle();
        let task = spawn_metrics_upkeep(handle);
        tokio::task::yield_now().await;
        assert!(!task.is_finished());
        task.abort();
    }
}
