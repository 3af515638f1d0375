//! Response mapping.
//!
//! # Responsibilities
//! - Map routing and upstream errors to HTTP status codes
//! - Render errors as a JSON body
//!
//! # Design Decisions
//! - No matching route is a 404; upstream failures are 502
//! - Configuration errors never reach clients; they stop startup or reload

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::http::forward::ForwardError;
use crate::routing::RoutingError;

/// Errors surfaced to clients by the gateway handler.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Forward(#[from] ForwardError),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Routing(RoutingError::NoMatch { .. }) => StatusCode::NOT_FOUND,
            GatewayError::Routing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Forward(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Routing(RoutingError::NoMatch { .. }) => "ROUTE_NOT_FOUND",
            GatewayError::Routing(_) => "INTERNAL_ERROR",
            GatewayError::Forward(ForwardError::InvalidTarget { .. }) => "INVALID_TARGET",
            GatewayError::Forward(ForwardError::Upstream(_)) => "UPSTREAM_FAILED",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));

        (self.status(), body).into_response()
    }
}
