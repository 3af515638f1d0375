//! Glob pattern compilation.
//!
//! Path prefixes and header values may contain `*`. Each is rewritten to
//! `.*` and compiled once, when the matcher is built:
//! - path globs are anchored at the start only, so they stay prefix matches
//! - header globs are anchored at both ends
//!
//! Nothing besides `*` is rewritten. Other regex metacharacters in a
//! pattern keep their regex meaning, and a pattern that does not compile
//! fails construction.

use axum::http::HeaderName;
use regex::Regex;

use crate::config::RouteDefinition;
use crate::routing::error::RoutingError;

/// True if the value should be treated as a glob.
pub fn is_glob(value: &str) -> bool {
    value.contains('*')
}

/// Compile a path glob into a start-anchored regex.
pub fn compile_path_glob(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^{}", pattern.replace('*', ".*")))
}

/// Compile a header value glob into a fully anchored regex.
pub fn compile_value_glob(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^{}$", pattern.replace('*', ".*")))
}

/// Expected value of a declared header.
#[derive(Debug, Clone)]
pub enum HeaderExpectation {
    Exact(String),
    Wildcard(Regex),
}

impl HeaderExpectation {
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            HeaderExpectation::Exact(expected) => expected == actual,
            HeaderExpectation::Wildcard(re) => re.is_match(actual),
        }
    }
}

/// A header constraint with its name pre-parsed.
#[derive(Debug, Clone)]
pub struct CompiledHeader {
    pub name: HeaderName,
    pub expected: HeaderExpectation,
}

/// A route definition together with everything derived from it at build time.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pub definition: RouteDefinition,
    /// Present only when `path_prefix` contains `*`.
    pub path_pattern: Option<Regex>,
    pub headers: Vec<CompiledHeader>,
}

impl CompiledRoute {
    /// Compile one route. `index` is its declaration position, used in errors.
    pub fn compile(index: usize, definition: RouteDefinition) -> Result<Self, RoutingError> {
        let path_pattern = if is_glob(&definition.path_prefix) {
            let re = compile_path_glob(&definition.path_prefix).map_err(|source| {
                RoutingError::InvalidPathPattern {
                    index,
                    pattern: definition.path_prefix.clone(),
                    source,
                }
            })?;
            Some(re)
        } else {
            None
        };

        let mut headers = Vec::with_capacity(definition.headers.len());
        for (name, value) in &definition.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                RoutingError::InvalidHeaderName {
                    index,
                    header: name.clone(),
                }
            })?;

            let expected = if is_glob(value) {
                let re = compile_value_glob(value).map_err(|source| {
                    RoutingError::InvalidHeaderPattern {
                        index,
                        header: name.clone(),
                        pattern: value.clone(),
                        source,
                    }
                })?;
                HeaderExpectation::Wildcard(re)
            } else {
                HeaderExpectation::Exact(value.clone())
            };

            headers.push(CompiledHeader {
                name: header_name,
                expected,
            });
        }

        Ok(Self {
            definition,
            path_pattern,
            headers,
        })
    }
}
