//! Static route table analysis.
//!
//! Finds pairs of enabled routes that compete for the same traffic, and
//! routes shadowed by a broader route declared before them. Findings are
//! advisory. They never change matching and never block startup.

use std::fmt;

use crate::config::RouteDefinition;

/// An advisory finding about the route table.
///
/// Indices are positions in the declared list, disabled routes included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteWarning {
    /// Same host, and one path prefix is a prefix of the other.
    HostPathConflict {
        first: usize,
        first_description: String,
        second: usize,
        second_description: String,
        host: String,
    },
    /// Same tenant on both routes.
    TenantConflict {
        first: usize,
        first_description: String,
        second: usize,
        second_description: String,
        tenant_id: String,
    },
    /// An earlier host-less route covers every path of a later host route.
    Unreachable {
        index: usize,
        description: String,
        shadowed_by: usize,
        shadowed_by_description: String,
    },
}

impl fmt::Display for RouteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteWarning::HostPathConflict {
                first,
                first_description,
                second,
                second_description,
                host,
            } => write!(
                f,
                "route conflict: route {first} ({first_description}) and route {second} ({second_description}) share host '{host}' with overlapping path prefixes"
            ),
            RouteWarning::TenantConflict {
                first,
                first_description,
                second,
                second_description,
                tenant_id,
            } => write!(
                f,
                "route conflict: route {first} ({first_description}) and route {second} ({second_description}) share tenant '{tenant_id}'"
            ),
            RouteWarning::Unreachable {
                index,
                description,
                shadowed_by,
                shadowed_by_description,
            } => write!(
                f,
                "route {index} ({description}) may be unreachable: route {shadowed_by} ({shadowed_by_description}) is declared earlier and subsumes it"
            ),
        }
    }
}

/// Run every check over `routes` and collect all findings.
pub fn validate<'a>(routes: impl IntoIterator<Item = &'a RouteDefinition>) -> Vec<RouteWarning> {
    let enabled: Vec<(usize, &RouteDefinition)> = routes
        .into_iter()
        .enumerate()
        .filter(|(_, r)| r.enabled)
        .collect();

    let mut warnings = Vec::new();

    for (pos, &(i, a)) in enabled.iter().enumerate() {
        for &(j, b) in &enabled[pos + 1..] {
            if !a.host.is_empty() && a.host == b.host && prefixes_overlap(&a.path_prefix, &b.path_prefix) {
                warnings.push(RouteWarning::HostPathConflict {
                    first: i,
                    first_description: a.description.clone(),
                    second: j,
                    second_description: b.description.clone(),
                    host: a.host.clone(),
                });
            }
            if !a.tenant_id.is_empty() && a.tenant_id == b.tenant_id {
                warnings.push(RouteWarning::TenantConflict {
                    first: i,
                    first_description: a.description.clone(),
                    second: j,
                    second_description: b.description.clone(),
                    tenant_id: a.tenant_id.clone(),
                });
            }
        }
    }

    for (pos, &(i, later)) in enabled.iter().enumerate() {
        let shadow = enabled[..pos]
            .iter()
            .find(|(_, earlier)| subsumes(earlier, later));
        if let Some(&(j, earlier)) = shadow {
            warnings.push(RouteWarning::Unreachable {
                index: i,
                description: later.description.clone(),
                shadowed_by: j,
                shadowed_by_description: earlier.description.clone(),
            });
        }
    }

    warnings
}

/// True if either prefix is a string prefix of the other.
fn prefixes_overlap(a: &str, b: &str) -> bool {
    a.starts_with(b) || b.starts_with(a)
}

/// True if `earlier` has no host restriction, `later` has one, and
/// `earlier`'s path prefix is empty or a prefix of `later`'s.
pub fn subsumes(earlier: &RouteDefinition, later: &RouteDefinition) -> bool {
    earlier.host.is_empty()
        && !later.host.is_empty()
        && later.path_prefix.starts_with(&earlier.path_prefix)
}
