//! Relay chain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment variable SUBMITTER_KEY_<NETWORK>
//!     → wallet.rs (secret URI → sr25519 keypair)
//!     → client.rs (WebSocket RPC connection with timeout)
//!     → transaction.rs (build, sign, submit, translate status updates)
//!     → resolver (outcome)
//! ```
//!
//! # Security Constraints
//! - Secrets ONLY from environment variables
//! - Never log secrets; only derived addresses

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use transaction::{OrderPlacer, RelayOrderPlacer, StatusStream};
pub use types::{ChainError, ChainResult, SubmissionRequest};
