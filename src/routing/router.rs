//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Compile route definitions once, in declaration order
//! - Score every enabled route and return the best match or explicit NoMatch
//! - Answer tenant and host queries over the enabled routes
//! - Report conflicting and shadowed routes
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Best match, not first match; ties go to the earliest declared route
//! - O(n) scan per request; route tables are small

use serde::Serialize;

use crate::config::RouteDefinition;
use crate::routing::error::RoutingError;
use crate::routing::matcher::host_matches;
use crate::routing::pattern::CompiledRoute;
use crate::routing::request::RequestView;
use crate::routing::scorer::score;
use crate::routing::tenant::extract_tenant;
use crate::routing::validator::{self, RouteWarning};

/// A successful match.
#[derive(Debug, Clone, Copy)]
pub struct RouteMatch<'a> {
    pub index: usize,
    pub score: u32,
    pub route: &'a RouteDefinition,
}

/// Score of one enabled route for one request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteScore {
    pub index: usize,
    pub description: String,
    pub score: u32,
}

/// Immutable, compiled route table.
#[derive(Debug, Clone, Default)]
pub struct RouteMatcher {
    routes: Vec<CompiledRoute>,
}

impl RouteMatcher {
    /// Compile `routes`. Fails on the first route with an invalid pattern.
    pub fn new(routes: Vec<RouteDefinition>) -> Result<Self, RoutingError> {
        let routes = routes
            .into_iter()
            .enumerate()
            .map(|(index, def)| CompiledRoute::compile(index, def))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { routes })
    }

    /// Number of declared routes, disabled ones included.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Declared routes, in order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.routes.iter().map(|r| &r.definition)
    }

    fn enabled(&self) -> impl Iterator<Item = (usize, &CompiledRoute)> {
        self.routes
            .iter()
            .enumerate()
            .filter(|(_, r)| r.definition.enabled)
    }

    /// Find the best route for a request.
    pub fn match_request(&self, req: &RequestView<'_>) -> Result<&RouteDefinition, RoutingError> {
        self.best_match(req).map(|m| m.route)
    }

    /// Like [`match_request`](Self::match_request), also returning the
    /// winner's index and score.
    pub fn best_match(&self, req: &RequestView<'_>) -> Result<RouteMatch<'_>, RoutingError> {
        self.best_match_for_tenant(req, &extract_tenant(req))
    }

    /// Like [`best_match`](Self::best_match), for a caller that has already
    /// extracted the request's tenant.
    pub fn best_match_for_tenant(
        &self,
        req: &RequestView<'_>,
        tenant: &str,
    ) -> Result<RouteMatch<'_>, RoutingError> {
        let mut best: Option<RouteMatch<'_>> = None;

        for (index, route) in self.enabled() {
            let s = score(req, tenant, route);
            // Strict `>` keeps the earliest declared route on a tie.
            if s > best.map_or(0, |b| b.score) {
                best = Some(RouteMatch {
                    index,
                    score: s,
                    route: &route.definition,
                });
            }
        }

        best.ok_or_else(|| RoutingError::NoMatch {
            method: req.method().to_string(),
            path: req.path().to_string(),
        })
    }

    /// Score of every enabled route, in declaration order.
    pub fn explain(&self, req: &RequestView<'_>) -> Vec<RouteScore> {
        let tenant = extract_tenant(req);
        self.enabled()
            .map(|(index, route)| RouteScore {
                index,
                description: route.definition.description.clone(),
                score: score(req, &tenant, route),
            })
            .collect()
    }

    /// Enabled routes declared for exactly this tenant.
    pub fn routes_by_tenant(&self, tenant_id: &str) -> Vec<&RouteDefinition> {
        self.enabled()
            .map(|(_, r)| &r.definition)
            .filter(|def| def.tenant_id == tenant_id)
            .collect()
    }

    /// Enabled routes whose host pattern accepts `host`.
    pub fn routes_by_host(&self, host: &str) -> Vec<&RouteDefinition> {
        self.enabled()
            .map(|(_, r)| &r.definition)
            .filter(|def| host_matches(&def.host, host))
            .collect()
    }

    /// Conflicts and shadowed routes in this table.
    pub fn diagnostics(&self) -> Vec<RouteWarning> {
        validator::validate(self.routes())
    }

    /// Human-readable form of [`diagnostics`](Self::diagnostics).
    pub fn validate_routes(&self) -> Vec<String> {
        self.diagnostics().iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;

    fn route(description: &str) -> RouteDefinition {
        RouteDefinition {
            description: description.into(),
            ..Default::default()
        }
    }

    fn get(host: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("Host", host)
            .body(Body::empty())
            .unwrap()
    }

    fn matched<'a>(matcher: &'a RouteMatcher, req: &Request<Body>) -> Option<&'a str> {
        matcher
            .match_request(&RequestView::from_request(req))
            .ok()
            .map(|r| r.description.as_str())
    }

    #[test]
    fn test_best_match_not_first_match() {
        let matcher = RouteMatcher::new(vec![
            RouteDefinition { path_prefix: "/".into(), ..route("root") },
            RouteDefinition { path_prefix: "/api".into(), ..route("api") },
            RouteDefinition { host: "example.com".into(), ..route("host") },
        ])
        .unwrap();

        assert_eq!(matched(&matcher, &get("example.com", "/api/x")), Some("host"));
        assert_eq!(matched(&matcher, &get("other.com", "/api/x")), Some("api"));
        assert_eq!(matched(&matcher, &get("other.com", "/web")), Some("root"));
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        let matcher = RouteMatcher::new(vec![
            RouteDefinition { path_prefix: "/api".into(), ..route("first") },
            RouteDefinition { path_prefix: "/api".into(), ..route("second") },
        ])
        .unwrap();

        let req = get("h", "/api/users");
        let view = RequestView::from_request(&req);
        let m = matcher.best_match(&view).unwrap();
        assert_eq!(m.index, 0);
        assert_eq!(m.route.description, "first");
    }

    #[test]
    fn test_best_match_for_extracted_tenant() {
        let matcher = RouteMatcher::new(vec![
            RouteDefinition { tenant_id: "acme".into(), ..route("acme") },
            RouteDefinition { tenant_id: "globex".into(), ..route("globex") },
        ])
        .unwrap();

        let req = get("h", "/orders?tenant_id=globex");
        let view = RequestView::from_request(&req);
        let tenant = extract_tenant(&view);
        let m = matcher.best_match_for_tenant(&view, &tenant).unwrap();
        assert_eq!(m.route.description, "globex");
        assert_eq!(m.score, matcher.best_match(&view).unwrap().score);
    }

    #[test]
    fn test_unrestricted_route_never_wins_alone() {
        let matcher = RouteMatcher::new(vec![route("anything")]).unwrap();
        let err = matcher
            .match_request(&RequestView::from_request(&get("h", "/")))
            .unwrap_err();
        assert_eq!(err.to_string(), "no route found for GET /");
    }

    #[test]
    fn test_disabled_routes_are_invisible() {
        let matcher = RouteMatcher::new(vec![
            RouteDefinition {
                host: "example.com".into(),
                tenant_id: "acme".into(),
                enabled: false,
                ..route("off")
            },
            RouteDefinition { path_prefix: "/".into(), ..route("on") },
        ])
        .unwrap();

        let req = Request::builder()
            .uri("/")
            .header("Host", "example.com")
            .header("X-Tenant-ID", "acme")
            .body(Body::empty())
            .unwrap();
        assert_eq!(matched(&matcher, &req), Some("on"));
        assert!(matcher.routes_by_tenant("acme").is_empty());
        assert!(matcher.routes_by_host("example.com").is_empty());
    }

    #[test]
    fn test_routes_by_tenant_and_host() {
        let matcher = RouteMatcher::new(vec![
            RouteDefinition { host: "*.example.com".into(), tenant_id: "acme".into(), ..route("a") },
            RouteDefinition { host: "api.other.com".into(), tenant_id: "acme".into(), ..route("b") },
            RouteDefinition { host: "example.com".into(), ..route("c") },
        ])
        .unwrap();

        let by_tenant: Vec<_> = matcher.routes_by_tenant("acme").iter().map(|r| r.description.as_str()).collect();
        assert_eq!(by_tenant, ["a", "b"]);

        let by_host: Vec<_> = matcher.routes_by_host("example.com:443").iter().map(|r| r.description.as_str()).collect();
        assert_eq!(by_host, ["a", "c"]);
    }

    #[test]
    fn test_explain_lists_enabled_routes() {
        let matcher = RouteMatcher::new(vec![
            RouteDefinition { path_prefix: "/api".into(), ..route("api") },
            RouteDefinition { enabled: false, ..route("off") },
            RouteDefinition { path_prefix: "/web".into(), ..route("web") },
        ])
        .unwrap();

        let req = get("h", "/api");
        let scores = matcher.explain(&RequestView::from_request(&req));
        assert_eq!(
            scores,
            vec![
                RouteScore { index: 0, description: "api".into(), score: 140 },
                RouteScore { index: 2, description: "web".into(), score: 0 },
            ]
        );
    }

    #[test]
    fn test_construction_fails_on_bad_glob() {
        let err = RouteMatcher::new(vec![
            RouteDefinition { path_prefix: "/ok".into(), ..route("ok") },
            RouteDefinition { path_prefix: "/bad/(*".into(), ..route("bad") },
        ])
        .unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, RoutingError::InvalidPathPattern { index: 1, .. }));
    }

    #[test]
    fn test_validate_routes_strings() {
        let matcher = RouteMatcher::new(vec![
            RouteDefinition { path_prefix: "/api".into(), ..route("A") },
            RouteDefinition { host: "foo.com".into(), path_prefix: "/api/v2".into(), ..route("B") },
        ])
        .unwrap();
        let warnings = matcher.validate_routes();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("route 1 (B) may be unreachable"));
    }
}
