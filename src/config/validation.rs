//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, timeouts and route targets
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Route patterns are checked when the route table is compiled, not here;
//!   overlapping routes are warnings from the routing validator, not errors

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{GatewayConfig, PLACEHOLDER_API_KEY};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("listener.max_connections must be greater than zero")]
    ZeroMaxConnections,

    #[error("route {index} ({description}): missing target")]
    MissingTarget { index: usize, description: String },

    #[error("route {index} ({description}): invalid target '{target}'")]
    InvalidTarget {
        index: usize,
        description: String,
        target: String,
    },

    #[error("admin.api_key must be changed when the admin API is enabled")]
    PlaceholderApiKey,
}

pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    }

    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.admin.enabled {
        check_address(&mut errors, "admin.bind_address", &config.admin.bind_address);
        if config.admin.api_key.is_empty() || config.admin.api_key == PLACEHOLDER_API_KEY {
            errors.push(ValidationError::PlaceholderApiKey);
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    for (index, route) in config.routes.iter().enumerate() {
        if route.target.is_empty() {
            errors.push(ValidationError::MissingTarget {
                index,
                description: route.description.clone(),
            });
            continue;
        }

        let valid = Url::parse(&route.target)
            .map(|u| u.scheme() == "http" && u.host_str().is_some())
            .unwrap_or(false);
        if !valid {
            errors.push(ValidationError::InvalidTarget {
                index,
                description: route.description.clone(),
                target: route.target.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteDefinition;

    fn route(target: &str) -> RouteDefinition {
        RouteDefinition {
            description: "r".into(),
            target: target.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.listener.max_connections = 0;
        config.timeouts.request_secs = 0;
        config.routes.push(route(""));
        config.routes.push(route("ftp://files.example.com"));
        config.routes.push(route("http://10.0.0.1:8080"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidAddress {
                    field: "listener.bind_address",
                    value: "not-an-address".into(),
                },
                ValidationError::ZeroMaxConnections,
                ValidationError::ZeroRequestTimeout,
                ValidationError::MissingTarget { index: 0, description: "r".into() },
                ValidationError::InvalidTarget {
                    index: 1,
                    description: "r".into(),
                    target: "ftp://files.example.com".into(),
                },
            ]
        );
    }

    #[test]
    fn test_admin_requires_real_key() {
        let mut config = GatewayConfig::default();
        config.admin.enabled = true;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::PlaceholderApiKey]
        );

        config.admin.api_key = "s3cret".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_max_connections_rejected() {
        let mut config = GatewayConfig::default();
        config.listener.max_connections = 0;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::ZeroMaxConnections]
        );
    }
}
