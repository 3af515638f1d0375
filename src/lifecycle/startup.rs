//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Start background tasks (metrics, config watcher, admin API)
//! - Bind listeners and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: an invalid route table or unbindable address is fatal
//! - Listeners start last (traffic only when ready)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::admin::setup_admin_router;
use crate::config::{ConfigWatcher, GatewayConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::routing::RoutingError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route table rejected: {0}")]
    Routing(#[from] RoutingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config watcher failed: {0}")]
    Watch(#[from] notify::Error),

    #[error("invalid address '{0}'")]
    Address(String),
}

fn parse_addr(value: &str) -> Result<SocketAddr, StartupError> {
    value.parse().map_err(|_| StartupError::Address(value.to_string()))
}

/// Run the gateway until a shutdown signal arrives.
///
/// `config_path` enables file watching when `reload.watch` is set.
pub async fn run(config: GatewayConfig, config_path: Option<PathBuf>) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        metrics::init_metrics(parse_addr(&config.observability.metrics_address)?);
    }

    let server = HttpServer::new(config.clone())?;
    let shutdown = Shutdown::new();

    // Keep the watcher alive for the life of the server.
    let (config_updates, _watcher) = match config_path {
        Some(path) if config.reload.watch => {
            let (watcher, rx) =
                ConfigWatcher::new(&path, Duration::from_secs(config.reload.poll_interval_secs));
            (rx, Some(watcher.run()?))
        }
        _ => (mpsc::unbounded_channel().1, None),
    };

    if config.admin.enabled {
        let admin_listener = TcpListener::bind(parse_addr(&config.admin.bind_address)?).await?;
        let app = setup_admin_router(server.state(), &config.admin.api_key);
        let mut admin_shutdown = shutdown.subscribe();
        tracing::info!(address = %admin_listener.local_addr()?, "Admin API listening");
        tokio::spawn(async move {
            let result = axum::serve(admin_listener, app)
                .with_graceful_shutdown(async move {
                    let _ = admin_shutdown.recv().await;
                })
                .await;
            if let Err(e) = result {
                tracing::error!(error = %e, "Admin API stopped");
            }
        });
    }

    let listener = TcpListener::bind(parse_addr(&config.listener.bind_address)?).await?;
    let server_shutdown = shutdown.subscribe();

    let serve = tokio::spawn(server.run(listener, config_updates, server_shutdown));
    signals::wait_for_signal(&shutdown).await;

    match serve.await {
        Ok(result) => result?,
        Err(e) => tracing::error!(error = %e, "Server task failed"),
    }
    Ok(())
}
