//! Atomically swappable route table.
//!
//! Request handlers `load()` the current matcher and keep that `Arc` for
//! the life of the request. A reload compiles a brand-new matcher and swaps
//! it in; nothing is ever mutated in place, so readers never lock and never
//! see a half-updated table.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::RouteDefinition;
use crate::observability::metrics;
use crate::routing::error::RoutingError;
use crate::routing::router::RouteMatcher;
use crate::routing::validator::RouteWarning;

pub struct RouteTable {
    current: ArcSwap<RouteMatcher>,
}

impl RouteTable {
    /// Build the initial table. Invalid patterns abort construction.
    pub fn new(routes: Vec<RouteDefinition>) -> Result<Self, RoutingError> {
        let matcher = RouteMatcher::new(routes)?;
        log_warnings(&matcher.diagnostics());
        metrics::record_route_table(matcher.len());

        tracing::info!(routes = matcher.len(), "Route table built");
        Ok(Self {
            current: ArcSwap::from_pointee(matcher),
        })
    }

    /// Snapshot of the live matcher.
    pub fn load(&self) -> Arc<RouteMatcher> {
        self.current.load_full()
    }

    /// Compile `routes` and publish them. On error the live table is kept.
    pub fn publish(&self, routes: Vec<RouteDefinition>) -> Result<Vec<RouteWarning>, RoutingError> {
        let matcher = match RouteMatcher::new(routes) {
            Ok(m) => m,
            Err(e) => {
                metrics::record_reload(false);
                tracing::error!(error = %e, "Rejected route table; keeping current routes");
                return Err(e);
            }
        };

        let warnings = matcher.diagnostics();
        log_warnings(&warnings);

        let count = matcher.len();
        self.current.store(Arc::new(matcher));
        metrics::record_reload(true);
        metrics::record_route_table(count);

        tracing::info!(routes = count, warnings = warnings.len(), "Route table published");
        Ok(warnings)
    }
}

fn log_warnings(warnings: &[RouteWarning]) {
    for warning in warnings {
        tracing::warn!(%warning, "Route table diagnostic");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_route(prefix: &str) -> RouteDefinition {
        RouteDefinition {
            description: prefix.into(),
            path_prefix: prefix.into(),
            target: "http://127.0.0.1:9000".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_publish_swaps_table() {
        let table = RouteTable::new(vec![api_route("/v1")]).unwrap();
        let before = table.load();

        table.publish(vec![api_route("/v1"), api_route("/v2")]).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(table.load().len(), 2);
    }

    #[test]
    fn test_failed_publish_keeps_table() {
        let table = RouteTable::new(vec![api_route("/v1")]).unwrap();
        assert!(table.publish(vec![api_route("/v1/(*")]).is_err());
        assert_eq!(table.load().len(), 1);
    }

    #[test]
    fn test_publish_returns_warnings() {
        let table = RouteTable::new(Vec::new()).unwrap();
        let mut shadowed = api_route("/api/v2");
        shadowed.host = "foo.com".into();
        let warnings = table.publish(vec![api_route("/api"), shadowed]).unwrap();
        assert_eq!(warnings.len(), 1);
    }
}
