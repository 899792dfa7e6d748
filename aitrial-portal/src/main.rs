//! aitrial-portal - Read-only AI litigation catalog service
//!
//! Loads the static case dataset and the precomputed choropleth once, then
//! serves search, trend, map and composition views as JSON.

use std::net::SocketAddr;
use std::path::PathBuf;

use aitrial_common::config::{load_config, resolve_data_folder, DataPaths};
use aitrial_common::RecordStore;
use aitrial_portal::{build_router, init_tracing, load_map_data, AppState};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

/// Command-line arguments for aitrial-portal
#[derive(Parser, Debug)]
#[command(name = "aitrial-portal")]
#[command(about = "Read-only AI litigation catalog service")]
#[command(version)]
struct Args {
    /// Bootstrap TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder holding the case dataset and map files
    #[arg(short, long)]
    data_folder: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long, env = "AITRIAL_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level);

    // Log build identification immediately after tracing init
    info!(
        "Starting AI on Trial portal (aitrial-portal) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let data_folder = resolve_data_folder(args.data_folder.as_deref(), &config);
    let paths = DataPaths::resolve(&data_folder, &config);
    info!("Data folder: {}", data_folder.display());

    // A malformed dataset is fatal
    let store = RecordStore::from_path(&paths.cases)
        .with_context(|| format!("Failed to load case dataset {}", paths.cases.display()))?;
    info!("✓ Loaded {} cases", store.len());

    let choropleth = load_map_data(&paths, &store);
    let app = build_router(AppState::new(store, choropleth));

    let port = args.port.unwrap_or(config.port);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("aitrial-portal listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
