//! Host and path match rules.
//!
//! # Responsibilities
//! - Strip the port from a request host
//! - Match a host against an exact or `*.domain` wildcard pattern
//! - Match a path against a literal prefix or a compiled glob
//!
//! # Design Decisions
//! - Host comparison is exact, case-sensitive string equality
//! - `*.domain` also matches the bare `domain`; existing route tables rely on it
//! - Path matching is case-sensitive
//! - Empty patterns are handled by the scorer, not here

use regex::Regex;

/// Strip a trailing `:port` from a host value.
///
/// Bracketed IPv6 literals keep their brackets: `[::1]:8080` becomes `[::1]`.
pub fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }

    match host.split_once(':') {
        Some((name, _)) => name,
        None => host,
    }
}

/// True if `request_host` satisfies the route's host `pattern`.
pub fn host_matches(pattern: &str, request_host: &str) -> bool {
    let host = strip_port(request_host);
    if host == pattern {
        return true;
    }

    match pattern.strip_prefix("*.") {
        Some(domain) => {
            host == domain
                || (host.len() > domain.len()
                    && host.ends_with(domain)
                    && host.as_bytes()[host.len() - domain.len() - 1] == b'.')
        }
        None => false,
    }
}

/// True if `path` satisfies the route's path `prefix`.
///
/// A literal prefix match always counts. When the prefix was a glob, the
/// compiled pattern is tried as well.
pub fn path_matches(prefix: &str, pattern: Option<&Regex>, path: &str) -> bool {
    path.starts_with(prefix) || pattern.is_some_and(|re| re.is_match(path))
}
