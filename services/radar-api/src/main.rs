//! MRMS Radar API Server
//!
//! Serves the latest radar record, falling back to sample data when no
//! upstream source answers.

use std::path::PathBuf;
use std::sync::Arc;

use acquisition::AcquisitionConfig;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use radar_api::{build_router, listen_addr};
use radar_api::state::AppState;

/// MRMS Radar API Server
#[derive(Parser, Debug)]
#[command(name = "radar-api")]
#[command(about = "HTTP API for the latest MRMS radar data")]
struct Args {
    /// Listen port
    #[arg(short, long, default_value = "5000", env = "PORT")]
    port: u16,

    /// Listen IP address (IPv4 or IPv6)
    #[arg(long, default_value = "0.0.0.0", env = "RADAR_HOST")]
    host: String,

    /// Directory holding sources.yaml
    #[arg(long, default_value = "config", env = "RADAR_CONFIG_DIR")]
    config_dir: PathBuf,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Override the per-candidate probe timeout
    #[arg(long, env = "RADAR_PROBE_TIMEOUT_SECS")]
    probe_timeout_secs: Option<u64>,

    /// Number of worker threads
    #[arg(long, env = "RADAR_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting MRMS Radar API server");

    let mut config = AcquisitionConfig::load_from_dir(&args.config_dir)
        .with_context(|| format!("Failed to load config from {}", args.config_dir.display()))?;
    if let Some(secs) = args.probe_timeout_secs {
        config.probe_timeout_secs = secs;
    }

    let state = Arc::new(AppState::from_config(&config)?);
    let app = build_router(state, Some(prometheus_handle));

    let addr = listen_addr(&args.host, args.port)
        .with_context(|| format!("Invalid listen host '{}'", args.host))?;

    info!(%addr, "Radar API listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    info!("Radar API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
