//! Transaction status resolution.
//!
//! # Responsibilities
//! - Interpret the status updates of one submitted transaction
//! - Settle exactly one [`Outcome`] and stop observing afterwards
//! - Log each branch for operators
//!
//! # Policy
//! - Dispatch error: settle `Failure` with the decoded message
//! - In block: settle `Success`, unless a dispatch error in the same update
//!   already settled it (dispatch errors are handled first)
//! - Finalized: log only
//! - Nothing else settles; without a timeout the wait is unbounded

use std::pin::pin;
use std::time::Duration;

use futures_util::{Stream, StreamExt};

use crate::blockchain::types::ChainResult;
use crate::observability::metrics;
use crate::resolver::settle::{outcome_channel, OutcomeCell, PendingOutcome};
use crate::resolver::types::{
    DispatchFailure, Outcome, ResolveError, StatusEvent, StatusNotification,
};

/// Turns status updates for one transaction into a single [`Outcome`].
#[derive(Debug)]
pub struct TransactionStatusResolver {
    network: String,
    cell: OutcomeCell,
}

impl TransactionStatusResolver {
    /// Create a resolver and the handle its outcome is delivered to.
    pub fn new(network: impl Into<String>) -> (Self, PendingOutcome) {
        let (cell, pending) = outcome_channel();
        let resolver = Self {
            network: network.into(),
            cell,
        };
        (resolver, pending)
    }

    /// Whether an outcome has been settled.
    pub fn is_settled(&self) -> bool {
        self.cell.is_settled()
    }

    /// Apply one status update.
    pub fn observe(&mut self, notification: &StatusNotification) {
        for event in notification.events() {
            self.handle(event);
        }
    }

    fn handle(&mut self, event: StatusEvent) {
        metrics::record_status_event(event.kind());

        match event {
            StatusEvent::DispatchError(failure) => {
                let message = failure.message();
                match failure {
                    DispatchFailure::Module { .. } => tracing::error!(
                        network = %self.network,
                        error = %message,
                        "Transaction rejected by runtime module"
                    ),
                    DispatchFailure::Opaque(_) => tracing::error!(
                        network = %self.network,
                        error = %message,
                        "Transaction dispatch failed"
                    ),
                }
                self.settle(Outcome::Failure(message));
            }
            StatusEvent::InBlock => {
                if self.cell.is_settled() {
                    tracing::debug!(network = %self.network, "Inclusion after settlement ignored");
                } else {
                    tracing::info!(network = %self.network, "Success: transaction in block");
                    self.settle(Outcome::Success);
                }
            }
            StatusEvent::Finalized => {
                tracing::info!(network = %self.network, "Transaction finalized");
            }
        }
    }

    fn settle(&mut self, outcome: Outcome) {
        if !self.cell.settle(outcome) {
            tracing::trace!(network = %self.network, "Outcome already settled");
        }
    }

    /// Feed status updates until settled or the stream ends.
    ///
    /// Errors reported by the chain client before settlement are returned.
    pub async fn watch<S>(mut self, statuses: S) -> Result<(), ResolveError>
    where
        S: Stream<Item = ChainResult<StatusNotification>>,
    {
        let mut statuses = pin!(statuses);

        while let Some(notification) = statuses.next().await {
            self.observe(&notification?);
            if self.is_settled() {
                return Ok(());
            }
        }

        tracing::warn!(network = %self.network, "Status stream ended without an in-block status");
        Ok(())
    }
}

/// Resolve the outcome of one submission from its status stream.
///
/// With `timeout` unset the wait is unbounded: a stream that never yields
/// never resolves.
pub async fn resolve<S>(
    network: &str,
    statuses: S,
    timeout: Option<Duration>,
) -> Result<Outcome, ResolveError>
where
    S: Stream<Item = ChainResult<StatusNotification>>,
{
    let (resolver, pending) = TransactionStatusResolver::new(network);
    let wait = async move {
        resolver.watch(statuses).await?;
        pending.wait().await
    };

    match timeout {
        None => wait.await,
        Some(limit) => tokio::time::timeout(limit, wait)
            .await
            .map_err(|_| ResolveError::Timeout(limit.as_secs()))?,
    }
}
