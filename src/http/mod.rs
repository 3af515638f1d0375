//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → routing layer decides the route
//!     → forward.rs (rewrite URI, send upstream)
//!     → response.rs (error mapping)
//!     → Send to client
//! ```

pub mod forward;
pub mod limit;
pub mod request;
pub mod response;
pub mod server;

pub use forward::{ForwardError, Forwarder};
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::GatewayError;
pub use server::{AppState, HttpServer};
