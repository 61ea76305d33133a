#![doc = include_str!("../README.md")]

mod server;

use clap::Parser;
use roman_core::RomanService;
use server::config::{CliArgs, ServerConfig};
use server::http::router;
use server::telemetry::init_telemetry;
use tokio::net::TcpListener;
use tokio::signal;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    let providers = init_telemetry()?;

    let service = RomanService::new(config.service.clone());
    let listener = TcpListener::bind(&config.server_addr).await?;
    log_startup_info(&config);

    axum::serve(listener, router(service.clone()))
        .with_graceful_shutdown(shutdown_after(shutdown_signal(), service))
        .await?;

    tracing::info!("Service shut down successfully");
    providers.shutdown();
    Ok(())
}

fn log_startup_info(config: &ServerConfig) {
    if cfg!(debug_assertions) {
        tracing::info!(
            "Starting Roman numeral service on {} with full config: {:#?}",
            config.server_addr,
            config
        );
    } else {
        tracing::info!(
            "Starting Roman numeral service on {} with {} workers",
            config.server_addr,
            config.service.num_workers
        );
    }
}

/// Waits for `signal`, then shuts the worker pool down. The listener keeps
/// serving until this resolves, so `/health` reports `NOT_SERVING` while
/// in-flight range requests drain.
async fn shutdown_after(signal: impl Future<Output = ()>, service: RomanService) {
    signal.await;

    if let Err(e) = service.shutdown().await {
        tracing::error!("Error during service shutdown: {e}");
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C signal"),
        () = terminate => tracing::info!("Received SIGTERM signal"),
    }

    tracing::info!("Shutdown signal received, terminating gracefully...");
}
