//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path, headers, query)
//!     → request.rs (borrowed RequestView)
//!     → tenant.rs (header → host → path → query)
//!     → scorer.rs (score every enabled route, 0 = disqualified)
//!     → router.rs (highest score wins, earliest on tie)
//!     → Return: matched RouteDefinition or NoMatch
//!
//! Route Compilation (at startup and on reload):
//!     RouteDefinition[]
//!     → pattern.rs (compile path/header globs, fail fast)
//!     → validator.rs (conflict and shadowing warnings)
//!     → table.rs (atomic swap of Arc<RouteMatcher>)
//! ```
//!
//! # Design Decisions
//! - Routes compiled once, immutable at runtime
//! - Best match wins, not first match
//! - Deterministic: same input always matches same route
//! - Declaration order is the tie-break

pub mod error;
pub mod matcher;
pub mod pattern;
pub mod request;
pub mod router;
pub mod scorer;
pub mod table;
pub mod tenant;
pub mod validator;

pub use crate::config::RouteDefinition;
pub use error::RoutingError;
pub use request::RequestView;
pub use router::{RouteMatch, RouteMatcher, RouteScore};
pub use table::RouteTable;
pub use validator::RouteWarning;
