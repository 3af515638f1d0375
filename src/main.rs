//! Multi-tenant API gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌──────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ http server ─▶ routing engine ─▶ forwarder ─┼──▶ Backend
//!                           │                   (RouteTable)                │
//!                           │                        ▲                      │
//!                           │   config watcher ──────┘ publish (swap)       │
//!                           │                                               │
//!                           │   admin API · metrics · logging · lifecycle   │
//!                           └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use tenant_gateway::config::{load_config, GatewayConfig};
use tenant_gateway::lifecycle::startup;
use tenant_gateway::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "tenant-gateway")]
#[command(about = "Multi-tenant API gateway", long_about = None)]
struct Cli {
    /// Path to the gateway config file (TOML or JSON).
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        "tenant-gateway starting"
    );

    startup::run(config, cli.config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
