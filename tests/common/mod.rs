//! Shared utilities for driver integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use coretime_buyer::blockchain::types::{ChainError, ChainResult, SubmissionRequest};
use coretime_buyer::blockchain::{OrderPlacer, StatusStream};
use coretime_buyer::config::NetworkConfig;
use coretime_buyer::resolver::StatusNotification;
use futures_util::stream::{self, StreamExt};

/// What the mock chain does when an order is placed on a network.
#[derive(Debug, Clone)]
pub enum Script {
    /// Deliver these status updates, then end the stream.
    Updates(Vec<StatusNotification>),
    /// Fail to connect.
    ConnectionRefused,
    /// Accept the order, then have the pool drop it with this reason.
    PoolDrops(String),
    /// Accept the order but never report a status.
    Silent,
}

/// An order as seen by the mock chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub network: String,
    pub max_amount: u128,
    pub para_id: u32,
    pub account: String,
}

/// Order placer that replays scripted chain behavior per network.
#[derive(Clone, Default)]
pub struct ScriptedPlacer {
    scripts: HashMap<String, Script>,
    orders: Arc<Mutex<Vec<PlacedOrder>>>,
}

impl ScriptedPlacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, network: &str, script: Script) -> Self {
        self.scripts.insert(network.to_string(), script);
        self
    }

    /// Orders placed so far, in order.
    pub fn orders(&self) -> Vec<PlacedOrder> {
        self.orders.lock().unwrap().clone()
    }
}

impl OrderPlacer for ScriptedPlacer {
    async fn place_order(
        &self,
        network: &NetworkConfig,
        request: SubmissionRequest,
    ) -> ChainResult<StatusStream> {
        self.orders.lock().unwrap().push(PlacedOrder {
            network: network.name.clone(),
            max_amount: request.max_amount,
            para_id: request.para_id,
            account: request.account(),
        });

        let script = self
            .scripts
            .get(&network.name)
            .cloned()
            .unwrap_or(Script::Updates(vec![StatusNotification::in_block()]));

        match script {
            Script::Updates(updates) => Ok(stream::iter(updates.into_iter().map(Ok)).boxed()),
            Script::PoolDrops(reason) => {
                let dropped = ChainError::PoolRejected {
                    status: "dropped",
                    reason,
                };
                Ok(stream::iter(vec![Err::<StatusNotification, _>(dropped)]).boxed())
            }
            Script::ConnectionRefused => Err(ChainError::Connection {
                endpoint: network.endpoint.clone(),
                reason: "connection refused".to_string(),
            }),
            Script::Silent => Ok(stream::pending::<ChainResult<StatusNotification>>().boxed()),
        }
    }
}

/// Secret lookup that knows a dev key for each listed network.
pub fn dev_keys(networks: &[&str]) -> impl Fn(&str) -> Option<String> {
    let vars: Vec<String> = networks
        .iter()
        .map(|n| format!("SUBMITTER_KEY_{}", n.to_uppercase()))
        .collect();
    move |var: &str| vars.iter().any(|v| v == var).then(|| "//Alice".to_string())
}
