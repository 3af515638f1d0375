//! Multi-tenant API gateway: request routing and dispatch.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{RequestView, RouteDefinition, RouteMatcher, RouteTable, RouteWarning, RoutingError};
