//! Transaction status resolution subsystem.
//!
//! # Data Flow
//! ```text
//! chain client status updates (StatusNotification stream)
//!     → status.rs (interpret events in order: dispatch error, in block, finalized)
//!     → settle.rs (one-shot outcome cell, first settlement wins)
//!     → Outcome delivered to the purchase driver
//! ```

pub mod settle;
pub mod status;
pub mod types;

pub use settle::{outcome_channel, OutcomeCell, PendingOutcome};
pub use status::{resolve, TransactionStatusResolver};
pub use types::{DispatchFailure, Outcome, ResolveError, StatusEvent, StatusNotification};
