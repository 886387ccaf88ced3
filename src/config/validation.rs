//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the network table (unique names, usable endpoints, sane decimals)
//! - Check that defaults reference a configured network
//!
//! Returns all validation errors, not just the first.

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::{CoretimeConfig, ALL_NETWORKS};

/// Largest decimal count whose scale factor still fits comfortably in `u128`.
pub const MAX_DECIMALS: u32 = 30;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no networks configured")]
    NoNetworks,

    #[error("network name '{0}' must be non-empty and lowercase")]
    InvalidName(String),

    #[error("network '{0}' is configured more than once")]
    DuplicateNetwork(String),

    #[error("network name '{}' is reserved", ALL_NETWORKS)]
    ReservedName,

    #[error("network '{network}' has an invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        network: String,
        endpoint: String,
        reason: String,
    },

    #[error("network '{network}' has {decimals} decimals (max {})", MAX_DECIMALS)]
    TooManyDecimals { network: String, decimals: u32 },

    #[error("default network '{0}' is not configured")]
    UnknownDefaultNetwork(String),

    #[error("submission timeout must be greater than zero")]
    ZeroTimeout,

    #[error("connect timeout must be greater than zero")]
    ZeroConnectTimeout,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &CoretimeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.networks.is_empty() {
        errors.push(ValidationError::NoNetworks);
    }

    let mut seen = HashSet::new();
    for network in &config.networks {
        if network.name.is_empty() || network.name != network.name.to_lowercase() {
            errors.push(ValidationError::InvalidName(network.name.clone()));
        }
        if network.name == ALL_NETWORKS {
            errors.push(ValidationError::ReservedName);
        }
        if !seen.insert(network.name.as_str()) {
            errors.push(ValidationError::DuplicateNetwork(network.name.clone()));
        }
        if let Err(reason) = check_endpoint(&network.endpoint) {
            errors.push(ValidationError::InvalidEndpoint {
                network: network.name.clone(),
                endpoint: network.endpoint.clone(),
                reason,
            });
        }
        if network.decimals > MAX_DECIMALS {
            errors.push(ValidationError::TooManyDecimals {
                network: network.name.clone(),
                decimals: network.decimals,
            });
        }
    }

    let default_network = &config.defaults.network;
    if !default_network.eq_ignore_ascii_case(ALL_NETWORKS)
        && config.network(default_network).is_none()
    {
        errors.push(ValidationError::UnknownDefaultNetwork(default_network.clone()));
    }

    if config.submission.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.submission.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroConnectTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_endpoint(endpoint: &str) -> Result<(), String> {
    let url = Url::parse(endpoint).map_err(|e| e.to_string())?;
    match url.scheme() {
        "ws" | "wss" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::NetworkConfig;

    fn network(name: &str, endpoint: &str, decimals: u32) -> NetworkConfig {
        NetworkConfig {
            name: name.to_string(),
            endpoint: endpoint.to_string(),
            decimals,
            para_id: 1000,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&CoretimeConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = CoretimeConfig::default();
        config.networks = vec![
            network("Local", "ws://127.0.0.1:9944", 12),
            network("dup", "ws://127.0.0.1:9944", 12),
            network("dup", "https://example.com", 40),
        ];
        config.submission.timeout_secs = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidName("Local".into())));
        assert!(errors.contains(&ValidationError::DuplicateNetwork("dup".into())));
        assert!(errors.contains(&ValidationError::TooManyDecimals {
            network: "dup".into(),
            decimals: 40,
        }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidEndpoint { network, .. } if network == "dup")));
        // "paseo" is no longer configured
        assert!(errors.contains(&ValidationError::UnknownDefaultNetwork("paseo".into())));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
    }

    #[test]
    fn test_reserved_and_empty() {
        let mut config = CoretimeConfig::default();
        config.networks.push(network("all", "wss://example.com", 10));
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::ReservedName]);

        config.networks.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::NoNetworks));
    }

    #[test]
    fn test_default_network_may_be_all() {
        let mut config = CoretimeConfig::default();
        config.defaults.network = "ALL".into();
        assert!(validate_config(&config).is_ok());
    }
}
