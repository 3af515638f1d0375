//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all gateway handler
//! - Wire up middleware (timeout, concurrency limit, request ID, tracing)
//! - Build the initial route table and apply reloads
//! - Dispatch requests to the routing engine
//! - Forward matched requests to their backend target

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::forward::Forwarder;
use crate::http::limit::{concurrency_limit, ConcurrencyLimiter};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::response::GatewayError;
use crate::observability::metrics;
use crate::routing::tenant::extract_tenant;
use crate::routing::{RequestView, RouteTable, RoutingError};

/// Response header naming the route that served the request.
pub const X_GATEWAY_ROUTE: HeaderName = HeaderName::from_static("x-gateway-route");

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub forwarder: Forwarder,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if any route pattern does not compile.
    pub fn new(config: GatewayConfig) -> Result<Self, RoutingError> {
        let routes = Arc::new(RouteTable::new(config.routes.clone())?);
        let forwarder = Forwarder::new(Duration::from_secs(config.timeouts.connect_secs));

        let state = AppState { routes, forwarder };
        let router = Self::build_router(&config, state.clone());

        Ok(Self {
            router,
            config,
            state,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let limiter = Arc::new(ConcurrencyLimiter::new(config.listener.max_connections));

        let middleware = ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(axum::middleware::from_fn_with_state(limiter, concurrency_limit))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        Router::new()
            .route("/", any(gateway_handler))
            .route("/{*path}", any(gateway_handler))
            .with_state(state)
            .layer(middleware)
    }

    /// Shared state, for the admin API.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Every config received on `config_updates` has its routes published to
    /// the route table; a rejected table leaves the current one in place.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let routes = self.state.routes.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                // Errors are logged and counted by the table itself.
                let _ = routes.publish(config.routes);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main gateway handler.
/// Matches a route and forwards the request to its target.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request.request_id().to_string();
    let table = state.routes.load();

    let (matched, tenant) = {
        let view = RequestView::from_request(&request);
        let tenant = extract_tenant(&view);
        match table.best_match_for_tenant(&view, &tenant) {
            Ok(m) => (m, tenant),
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    method = %view.method(),
                    path = %view.path(),
                    host = %view.host(),
                    tenant = %tenant,
                    "No route matched"
                );
                metrics::record_miss();
                return GatewayError::from(e).into_response();
            }
        }
    };

    let route = matched.route;
    tracing::debug!(
        request_id = %request_id,
        route = %route.description,
        index = matched.index,
        score = matched.score,
        tenant = %tenant,
        "Route matched"
    );

    let mut response = match state.forwarder.forward(&route.target, request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                route = %route.description,
                target = %route.target,
                error = %e,
                "Upstream error"
            );
            GatewayError::from(e).into_response()
        }
    };

    if let Ok(value) = HeaderValue::from_str(&route.description) {
        response.headers_mut().insert(X_GATEWAY_ROUTE, value);
    }

    metrics::record_request(&route.description, response.status().as_u16(), start);
    response
}
