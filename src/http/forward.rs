//! Upstream forwarding.
//!
//! # Responsibilities
//! - Rewrite the request URI onto the matched route's target
//! - Send it with a pooled HTTP client and stream the response back
//!
//! # Design Decisions
//! - One target per route: no load balancing, no health-aware selection
//! - The target's base path is prepended to the request path
//! - Headers, including Host and the request ID, are forwarded unchanged

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("invalid upstream target '{target}'")]
    InvalidTarget { target: String },

    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

/// Forwards routed requests to their backend target.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
}

impl Forwarder {
    pub fn new(connect_timeout: Duration) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(connect_timeout));

        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self { client }
    }

    /// Send `request` to `target` and return the upstream response.
    pub async fn forward(&self, target: &str, request: Request<Body>) -> Result<Response<Body>, ForwardError> {
        let (mut parts, body) = request.into_parts();
        parts.uri = upstream_uri(target, &parts.uri)?;

        let response = self.client.request(Request::from_parts(parts, body)).await?;
        let (parts, body) = response.into_parts();
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

/// Join `target` (scheme, authority, optional base path) with the path and
/// query of the inbound `uri`.
pub fn upstream_uri(target: &str, uri: &Uri) -> Result<Uri, ForwardError> {
    let invalid = || ForwardError::InvalidTarget {
        target: target.to_string(),
    };

    let base: Uri = target.parse().map_err(|_| invalid())?;
    let scheme = base.scheme().cloned().ok_or_else(invalid)?;
    let authority = base.authority().cloned().ok_or_else(invalid)?;

    let base_path = base.path().trim_end_matches('/');
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    Uri::builder()
        .scheme(scheme)
        .authority(authority)
        .path_and_query(format!("{base_path}{path_and_query}"))
        .build()
        .map_err(|_| invalid())
}
