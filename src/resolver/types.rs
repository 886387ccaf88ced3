//! Status events, outcomes, and resolver errors.

use thiserror::Error;

use crate::blockchain::types::ChainError;

/// Why the runtime rejected a transaction's effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchFailure {
    /// A named error raised by a runtime module.
    Module {
        section: String,
        name: String,
        docs: Vec<String>,
    },
    /// A rejection without module metadata (bad origin, cannot lookup, ...).
    Opaque(String),
}

impl DispatchFailure {
    /// Human-readable message, `section.name: docs` for module errors.
    pub fn message(&self) -> String {
        match self {
            DispatchFailure::Module {
                section,
                name,
                docs,
            } => format!("{}.{}: {}", section, name, docs.join(" ")),
            DispatchFailure::Opaque(description) => description.clone(),
        }
    }
}

/// A single status event observed for a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// Included in a produced block (not yet final).
    InBlock,
    /// The including block was finalized.
    Finalized,
    /// The runtime rejected the transaction's effects.
    DispatchError(DispatchFailure),
}

impl StatusEvent {
    /// Metric label for this event kind.
    pub fn kind(&self) -> &'static str {
        match self {
            StatusEvent::InBlock => "in_block",
            StatusEvent::Finalized => "finalized",
            StatusEvent::DispatchError(DispatchFailure::Module { .. }) => "module_error",
            StatusEvent::DispatchError(DispatchFailure::Opaque(_)) => "opaque_error",
        }
    }
}

/// One status update delivered by the chain client.
///
/// A single update may report a dispatch error together with the block stage
/// that revealed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusNotification {
    pub in_block: bool,
    pub finalized: bool,
    pub dispatch_error: Option<DispatchFailure>,
}

impl StatusNotification {
    pub fn in_block() -> Self {
        Self {
            in_block: true,
            ..Self::default()
        }
    }

    pub fn finalized() -> Self {
        Self {
            finalized: true,
            ..Self::default()
        }
    }

    pub fn dispatch_error(failure: DispatchFailure) -> Self {
        Self {
            dispatch_error: Some(failure),
            ..Self::default()
        }
    }

    /// Attach a dispatch error to this update.
    pub fn with_dispatch_error(mut self, failure: DispatchFailure) -> Self {
        self.dispatch_error = Some(failure);
        self
    }

    /// Events carried by this update, dispatch error first.
    pub fn events(&self) -> Vec<StatusEvent> {
        let mut events = Vec::with_capacity(3);
        if let Some(failure) = &self.dispatch_error {
            events.push(StatusEvent::DispatchError(failure.clone()));
        }
        if self.in_block {
            events.push(StatusEvent::InBlock);
        }
        if self.finalized {
            events.push(StatusEvent::Finalized);
        }
        events
    }
}

/// Terminal result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(String),
}

/// Errors that end a wait without an [`Outcome`].
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The status stream closed without an in-block status or a dispatch
    /// error. A transaction reported only as finalized also ends here.
    #[error("Transaction status stream ended without an in-block status")]
    Abandoned,

    /// The configured inclusion timeout elapsed.
    #[error("Transaction not included after {0} seconds")]
    Timeout(u64),

    /// The chain client failed while reporting status.
    #[error(transparent)]
    Chain(#[from] ChainError),
}
