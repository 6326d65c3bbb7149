//! Edge flag service.
//!
//! Sits behind an access gateway that authenticates callers and injects their
//! identity. Serves an identity confirmation page and country-flag SVGs.
//!
//! # Architecture Overview
//!
//! ```text
//!     Access gateway + edge network
//!         │  (identity header, country header)
//!         ▼
//!   ┌──────────┐    ┌───────────────────────┐    ┌─────────────┐
//!   │ listener │───▶│ axum + tower-http     │───▶│ edge handler│
//!   └──────────┘    │ request id/trace/time │    └──────┬──────┘
//!                   └───────────────────────┘           │ Route::classify
//!                        ┌──────────────────────────────┼───────────────┐
//!                        ▼                              ▼               ▼
//!                 /secure, /secure/              …/secure/{code}     anything else
//!                 identity page (HTML)           ObjectStore::get    404 Not Found
//!                                                {code}.svg
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use edge_flags::config::{load_config, EdgeConfig};
use edge_flags::http::HttpServer;
use edge_flags::lifecycle::Shutdown;
use edge_flags::observability::{logging, metrics};
use edge_flags::store::FsObjectStore;

#[derive(Parser)]
#[command(name = "edge-flags")]
#[command(about = "Identity page and country-flag server for an access-gated edge", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `store.root`.
    #[arg(long)]
    store_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EdgeConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(root) = cli.store_root {
        config.store.root = root;
    }

    logging::init(&config.observability);

    tracing::info!("edge-flags v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        store_root = %config.store.root.display(),
        identity_header = %config.edge.identity_header,
        geo_header = %config.edge.geo_header,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    error = %e,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let store = FsObjectStore::open(&config.store).await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, Arc::new(store));
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
