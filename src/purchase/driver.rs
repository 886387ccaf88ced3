//! Sequential purchase driver.
//!
//! # Responsibilities
//! - Expand the network argument (`<name>` or `all`) against the config
//! - For each network in order: load the signer, convert the amount,
//!   place the order, resolve its outcome
//! - Isolate failures per network; one failure never stops the rest

use std::time::Duration;

use thiserror::Error;

use crate::blockchain::types::{ChainError, SubmissionRequest};
use crate::blockchain::wallet::keypair_from_lookup;
use crate::blockchain::OrderPlacer;
use crate::config::{CoretimeConfig, NetworkConfig, ALL_NETWORKS};
use crate::observability::metrics;
use crate::purchase::amount::{to_smallest_unit, AmountError};
use crate::resolver::{resolve, Outcome, ResolveError};

/// Errors that fail one network's purchase (or, for an unsupported
/// network, the whole run).
#[derive(Debug, Error)]
pub enum PurchaseError {
    #[error("Network '{0}' is not supported")]
    UnsupportedNetwork(String),

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The runtime rejected the order.
    #[error("{0}")]
    Rejected(String),
}

impl PurchaseError {
    /// Metric label for this failure.
    pub fn label(&self) -> &'static str {
        match self {
            PurchaseError::UnsupportedNetwork(_) | PurchaseError::Amount(_) => "invalid_input",
            PurchaseError::Chain(ChainError::MissingCredential { .. })
            | PurchaseError::Chain(ChainError::InvalidCredential { .. }) => "credential_error",
            PurchaseError::Chain(_) | PurchaseError::Resolve(ResolveError::Chain(_)) => {
                "chain_error"
            }
            PurchaseError::Resolve(ResolveError::Timeout(_)) => "timeout",
            PurchaseError::Resolve(ResolveError::Abandoned) => "abandoned",
            PurchaseError::Rejected(_) => "rejected",
        }
    }
}

/// Result of one network's purchase.
#[derive(Debug)]
pub struct NetworkReport {
    pub network: String,
    pub result: Result<(), PurchaseError>,
}

/// Results of a run, in the order networks were attempted.
#[derive(Debug, Default)]
pub struct PurchaseReport {
    pub networks: Vec<NetworkReport>,
}

impl PurchaseReport {
    /// Networks attempted, in order.
    pub fn attempted(&self) -> Vec<&str> {
        self.networks.iter().map(|r| r.network.as_str()).collect()
    }

    /// Number of successful purchases.
    pub fn succeeded(&self) -> usize {
        self.networks.iter().filter(|r| r.result.is_ok()).count()
    }

    /// Result for `network`, if it was attempted.
    pub fn result(&self, network: &str) -> Option<&Result<(), PurchaseError>> {
        self.networks
            .iter()
            .find(|r| r.network == network)
            .map(|r| &r.result)
    }
}

/// Expand a network argument into the networks to purchase on.
pub fn select_networks<'c>(
    config: &'c CoretimeConfig,
    selection: &str,
) -> Result<Vec<&'c NetworkConfig>, PurchaseError> {
    if selection.eq_ignore_ascii_case(ALL_NETWORKS) {
        return Ok(config.networks.iter().collect());
    }
    config
        .network(selection)
        .map(|network| vec![network])
        .ok_or_else(|| PurchaseError::UnsupportedNetwork(selection.to_string()))
}

/// Buys coretime on each selected network, one after another.
pub struct PurchaseDriver<'a, P, F> {
    config: &'a CoretimeConfig,
    placer: P,
    secrets: F,
}

impl<'a, P, F> PurchaseDriver<'a, P, F>
where
    P: OrderPlacer,
    F: Fn(&str) -> Option<String>,
{
    /// `secrets` resolves a variable name to its value (normally the
    /// process environment).
    pub fn new(config: &'a CoretimeConfig, placer: P, secrets: F) -> Self {
        Self {
            config,
            placer,
            secrets,
        }
    }

    /// Run the purchases. Omitted arguments fall back to the configured
    /// defaults.
    ///
    /// Only an unsupported network fails the run; per-network failures are
    /// logged and recorded in the report.
    pub async fn run(
        &self,
        network: Option<&str>,
        amount: Option<&str>,
    ) -> Result<PurchaseReport, PurchaseError> {
        let selection = network
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(self.config.defaults.network.as_str());
        let amount = amount.unwrap_or(self.config.defaults.amount.as_str());

        let networks = select_networks(self.config, selection).inspect_err(|e| {
            tracing::error!(network = %selection, "{}", e);
        })?;

        let mut report = PurchaseReport::default();
        for network in networks {
            let result = self.buy(network, amount).await;
            match &result {
                Ok(()) => {
                    tracing::info!(
                        network = %network.name,
                        "Successfully bought on-demand coretime on {}",
                        network.name
                    );
                    metrics::record_purchase(&network.name, "success");
                }
                Err(e) => {
                    tracing::error!(
                        network = %network.name,
                        "Error buying on-demand coretime on {}: {}",
                        network.name,
                        e
                    );
                    metrics::record_purchase(&network.name, e.label());
                }
            }
            report.networks.push(NetworkReport {
                network: network.name.clone(),
                result,
            });
        }

        tracing::info!(succeeded = report.succeeded(), attempted = report.networks.len(), "All done!");
        Ok(report)
    }

    async fn buy(&self, network: &NetworkConfig, amount: &str) -> Result<(), PurchaseError> {
        let signer = keypair_from_lookup(
            &self.config.submission.key_env_prefix,
            &network.name,
            &self.secrets,
        )?;
        let max_amount = to_smallest_unit(amount, network.decimals)?;
        let request = SubmissionRequest::new(max_amount, network.para_id, signer);

        tracing::info!(
            network = %network.name,
            max_amount = %max_amount,
            para_id = network.para_id,
            account = %request.account(),
            "Buying on-demand coretime"
        );

        let statuses = self.placer.place_order(network, request).await?;
        let timeout = self.config.submission.timeout_secs.map(Duration::from_secs);

        match resolve(&network.name, statuses, timeout).await? {
            Outcome::Success => Ok(()),
            Outcome::Failure(message) => Err(PurchaseError::Rejected(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_single_network() {
        let config = CoretimeConfig::default();
        let selected = select_networks(&config, "Kusama").unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "kusama");
    }

    #[test]
    fn test_select_all_keeps_table_order() {
        let config = CoretimeConfig::default();
        let names: Vec<_> = select_networks(&config, "ALL")
            .unwrap()
            .into_iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, ["polkadot", "paseo", "kusama"]);
    }

    #[test]
    fn test_select_unknown_network() {
        let config = CoretimeConfig::default();
        let err = select_networks(&config, "westend").unwrap_err();
        assert_eq!(err.to_string(), "Network 'westend' is not supported");
    }

    #[test]
    fn test_error_labels() {
        assert_eq!(PurchaseError::Rejected("x".into()).label(), "rejected");
        assert_eq!(
            PurchaseError::Resolve(ResolveError::Timeout(5)).label(),
            "timeout"
        );
        assert_eq!(
            PurchaseError::Chain(ChainError::MissingCredential {
                network: "paseo".into(),
                var: "SUBMITTER_KEY_PASEO".into(),
            })
            .label(),
            "credential_error"
        );
    }
}
