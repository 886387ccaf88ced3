//! Relay chain RPC client with connection timeout.
//!
//! # Responsibilities
//! - Connect to a network's WebSocket RPC endpoint
//! - Bound connection setup with a timeout
//! - Hand out the `subxt` client used for submission

use std::time::Duration;

use subxt::{OnlineClient, PolkadotConfig};
use tokio::time::timeout;

use crate::blockchain::types::{ChainError, ChainResult};
use crate::config::NetworkConfig;

/// Connected relay chain client.
#[derive(Clone)]
pub struct ChainClient {
    api: OnlineClient<PolkadotConfig>,
    network: NetworkConfig,
}

impl ChainClient {
    /// Connect to `network`.
    ///
    /// `ws://` endpoints are accepted for local development nodes.
    pub async fn connect(network: &NetworkConfig, connect_timeout: Duration) -> ChainResult<Self> {
        tracing::info!(
            network = %network.name,
            endpoint = %network.endpoint,
            "Creating provider, connecting"
        );

        let endpoint = network.endpoint.as_str();
        let connecting = async {
            if endpoint.starts_with("wss://") {
                OnlineClient::<PolkadotConfig>::from_url(endpoint).await
            } else {
                OnlineClient::<PolkadotConfig>::from_insecure_url(endpoint).await
            }
        };

        let api = match timeout(connect_timeout, connecting).await {
            Ok(Ok(api)) => api,
            Ok(Err(e)) => {
                return Err(ChainError::Connection {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(ChainError::ConnectTimeout {
                    endpoint: endpoint.to_string(),
                    secs: connect_timeout.as_secs(),
                })
            }
        };

        tracing::info!(
            network = %network.name,
            endpoint = %network.endpoint,
            spec_version = api.runtime_version().spec_version,
            "Connected"
        );

        Ok(Self {
            api,
            network: network.clone(),
        })
    }

    /// The underlying `subxt` client.
    pub fn api(&self) -> &OnlineClient<PolkadotConfig> {
        &self.api
    }

    /// The network this client is connected to.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("network", &self.network.name)
            .field("endpoint", &self.network.endpoint)
            .finish()
    }
}
