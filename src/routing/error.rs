//! Routing error types.

use thiserror::Error;

/// Errors produced while building or querying a route matcher.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// No enabled route scored above zero for the request.
    #[error("no route found for {method} {path}")]
    NoMatch { method: String, path: String },

    /// A glob path prefix did not translate into a valid regex.
    #[error("invalid path pattern '{pattern}' at route index {index}: {source}")]
    InvalidPathPattern {
        index: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A wildcard header value did not translate into a valid regex.
    #[error("invalid pattern '{pattern}' for header '{header}' at route index {index}: {source}")]
    InvalidHeaderPattern {
        index: usize,
        header: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A declared header name is not a legal HTTP header name.
    #[error("invalid header name '{header}' at route index {index}")]
    InvalidHeaderName { index: usize, header: String },
}

impl RoutingError {
    /// True for errors raised while constructing a matcher.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, RoutingError::NoMatch { .. })
    }
}
