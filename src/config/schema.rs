//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, connection limit).
    pub listener: ListenerConfig,

    /// Route definitions, in declaration order. Order is the tie-break
    /// for equally scored routes, so it must be preserved.
    pub routes: Vec<RouteDefinition>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Admin API settings.
    pub admin: AdminConfig,

    /// Config file watching.
    pub reload: ReloadConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum concurrent in-flight requests (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// A declarative rule mapping host/path/tenant/header criteria to a backend.
///
/// Empty criteria impose no restriction. Definitions are never mutated after
/// loading; a reload builds a new set.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteDefinition {
    /// Host to match. `*.domain` matches `domain` and any subdomain of it.
    #[serde(default)]
    pub host: String,

    /// Path prefix to match. `*` is a glob wildcard.
    #[serde(default)]
    pub path_prefix: String,

    /// Tenant that must be extracted from the request.
    #[serde(default)]
    pub tenant_id: String,

    /// Header name to expected value. Values may contain `*` wildcards.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Disabled routes never match.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Free-text identifier used in logs, metrics and warnings.
    #[serde(default)]
    pub description: String,

    /// Backend base URL. Opaque to the router; used by the forwarder.
    #[serde(default)]
    pub target: String,
}

fn default_enabled() -> bool {
    true
}

impl Default for RouteDefinition {
    fn default() -> Self {
        Self {
            host: String::new(),
            path_prefix: String::new(),
            tenant_id: String::new(),
            headers: BTreeMap::new(),
            enabled: true,
            description: String::new(),
            target: String::new(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

pub const PLACEHOLDER_API_KEY: &str = "CHANGE_ME_IN_PRODUCTION";

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the admin API.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Admin API bind address.
    pub bind_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: PLACEHOLDER_API_KEY.to_string(),
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}

/// Config file reload settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Watch the config file and republish routes on change.
    pub watch: bool,

    /// Poll interval for the file watcher in seconds.
    pub poll_interval_secs: u64,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            watch: true,
            poll_interval_secs: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_defaults() {
        let route: RouteDefinition = toml::from_str(r#"target = "http://127.0.0.1:9000""#).unwrap();
        assert!(route.enabled);
        assert!(route.host.is_empty());
        assert!(route.headers.is_empty());
    }

    #[test]
    fn test_full_config_from_toml() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:8000"

            [observability]
            log_format = "json"
            metrics_enabled = false

            [[routes]]
            description = "acme api"
            host = "*.example.com"
            path_prefix = "/api/*/users"
            tenant_id = "acme"
            target = "http://10.0.0.1:8080"
            headers = { "X-Version" = "v2*" }

            [[routes]]
            description = "legacy"
            enabled = false
            target = "http://10.0.0.2:8080"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:8000");
        assert_eq!(config.listener.max_connections, 10_000);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].headers.get("X-Version").map(String::as_str), Some("v2*"));
        assert!(!config.routes[1].enabled);
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
