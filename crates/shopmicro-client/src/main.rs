//! ShopMicro storefront renderer.
//!
//! Loads the view once and prints it, or prints the error state and exits
//! with a failure code.

use shopmicro_client::{render_error, render_view, ClientConfig, ViewClient};
use shopmicro_core::telemetry::DEFAULT_LOG_FILTER;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("{}", render_error(&e));
            return ExitCode::FAILURE;
        }
    };

    info!(api_base = %config.api_base, ml_base = %config.ml_base, "Loading ShopMicro...");

    let result = match ViewClient::new(&config) {
        Ok(client) => client.load_view().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(view) => {
            println!("{}", render_view(&view, &config));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", render_error(&e));
            ExitCode::FAILURE
        }
    }
}
