//! One-shot settlement of a submission outcome.

use tokio::sync::oneshot;

use crate::resolver::types::{Outcome, ResolveError};

/// Write side of a single-assignment outcome.
///
/// The first `settle` wins; later calls are ignored.
#[derive(Debug)]
pub struct OutcomeCell {
    tx: Option<oneshot::Sender<Outcome>>,
}

/// Read side of an [`OutcomeCell`].
#[derive(Debug)]
pub struct PendingOutcome {
    rx: oneshot::Receiver<Outcome>,
}

/// Create a connected cell/pending pair.
pub fn outcome_channel() -> (OutcomeCell, PendingOutcome) {
    let (tx, rx) = oneshot::channel();
    (OutcomeCell { tx: Some(tx) }, PendingOutcome { rx })
}

impl OutcomeCell {
    /// Settle the outcome. Returns `false` if it was already settled.
    pub fn settle(&mut self, outcome: Outcome) -> bool {
        match self.tx.take() {
            Some(tx) => {
                // The waiter may have gone away; the cell is settled either way.
                let _ = tx.send(outcome);
                true
            }
            None => false,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.tx.is_none()
    }
}

impl PendingOutcome {
    /// Wait for the outcome.
    ///
    /// Fails with [`ResolveError::Abandoned`] if the cell is dropped unsettled.
    pub async fn wait(self) -> Result<Outcome, ResolveError> {
        self.rx.await.map_err(|_| ResolveError::Abandoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_settlement_wins() {
        let (mut cell, pending) = outcome_channel();
        assert!(!cell.is_settled());
        assert!(cell.settle(Outcome::Failure("first".into())));
        assert!(!cell.settle(Outcome::Success));
        assert!(cell.is_settled());

        let outcome = pending.wait().await.unwrap();
        assert_eq!(outcome, Outcome::Failure("first".into()));
    }

    #[tokio::test]
    async fn test_dropped_cell_abandons() {
        let (cell, pending) = outcome_channel();
        drop(cell);
        assert!(matches!(pending.wait().await, Err(ResolveError::Abandoned)));
    }

    #[test]
    fn test_settle_without_waiter() {
        let (mut cell, pending) = outcome_channel();
        drop(pending);
        assert!(cell.settle(Outcome::Success));
        assert!(cell.is_settled());
    }
}
