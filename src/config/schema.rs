//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the buyer.
//! All types derive Serde traits for deserialization from config files, and
//! every section falls back to the built-in network table when omitted.

use serde::{Deserialize, Serialize};

/// Network selector that expands to every configured network.
pub const ALL_NETWORKS: &str = "all";

/// Root configuration for the coretime buyer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CoretimeConfig {
    /// Relay networks, in the order `all` visits them.
    pub networks: Vec<NetworkConfig>,

    /// Values used when the CLI omits a positional argument.
    pub defaults: DefaultsConfig,

    /// Submission and credential settings.
    pub submission: SubmissionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for CoretimeConfig {
    fn default() -> Self {
        Self {
            networks: default_networks(),
            defaults: DefaultsConfig::default(),
            submission: SubmissionConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl CoretimeConfig {
    /// Look up a network by name (case-insensitive).
    pub fn network(&self, name: &str) -> Option<&NetworkConfig> {
        let name = name.to_lowercase();
        self.networks.iter().find(|n| n.name == name)
    }
}

/// A single relay network the buyer can purchase on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Lowercase network name (e.g., "polkadot").
    pub name: String,

    /// WebSocket RPC endpoint.
    pub endpoint: String,

    /// Decimal places of the native token.
    pub decimals: u32,

    /// Para id the purchased coretime is credited to.
    pub para_id: u32,
}

impl NetworkConfig {
    fn builtin(name: &str, endpoint: &str, decimals: u32, para_id: u32) -> Self {
        Self {
            name: name.to_string(),
            endpoint: endpoint.to_string(),
            decimals,
            para_id,
        }
    }
}

/// Built-in relay networks.
pub fn default_networks() -> Vec<NetworkConfig> {
    vec![
        NetworkConfig::builtin("polkadot", "wss://polkadot-rpc.dwellir.com", 10, 2094),
        NetworkConfig::builtin("paseo", "wss://paseo-rpc.dwellir.com", 10, 2124),
        NetworkConfig::builtin("kusama", "wss://kusama-rpc.dwellir.com", 12, 2124),
    ]
}

/// Defaults for the positional CLI arguments.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Network used when none is given.
    pub network: String,

    /// Maximum amount in whole token units (e.g., "1" or "0.5").
    pub amount: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            network: "paseo".to_string(),
            amount: "1".to_string(),
        }
    }
}

/// Submission settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Prefix of the per-network secret variable; the uppercased network
    /// name is appended.
    pub key_env_prefix: String,

    /// RPC connection timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Upper bound on waiting for inclusion. `None` waits forever.
    pub timeout_secs: Option<u64>,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            key_env_prefix: "SUBMITTER_KEY_".to_string(),
            connect_timeout_secs: 30,
            timeout_secs: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,

    /// Prometheus exporter bind address. Disabled when unset.
    ///
    /// The listener lives only as long as the run, so it can be scraped only
    /// while purchases are in flight.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_address: None,
        }
    }
}
