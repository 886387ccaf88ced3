//! Chain-specific types and error definitions.

use std::fmt;

use subxt_signer::sr25519::Keypair;
use thiserror::Error;

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC request or subscription failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Could not establish the RPC connection.
    #[error("Connection to {endpoint} failed: {reason}")]
    Connection { endpoint: String, reason: String },

    /// RPC connection was not established in time.
    #[error("Connection to {endpoint} timed out after {secs} seconds")]
    ConnectTimeout { endpoint: String, secs: u64 },

    /// No secret configured for the network.
    #[error("No submitter key found for {network}. Please define {var} in the environment variables.")]
    MissingCredential { network: String, var: String },

    /// The configured secret is not a valid secret URI or seed.
    #[error("Invalid submitter key in {var}: {reason}")]
    InvalidCredential { var: String, reason: String },

    /// The transaction pool gave up on the transaction.
    #[error("Transaction pool reported {status}: {reason}")]
    PoolRejected { status: &'static str, reason: String },

    /// Building, signing or submitting the extrinsic failed.
    #[error("Submission failed: {0}")]
    Submission(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// One on-demand coretime order, ready to be signed and submitted.
pub struct SubmissionRequest {
    /// Maximum price in the smallest on-chain unit.
    pub max_amount: u128,
    /// Para id the coretime is credited to.
    pub para_id: u32,
    /// Signing credential.
    pub signer: Keypair,
}

impl SubmissionRequest {
    pub fn new(max_amount: u128, para_id: u32, signer: Keypair) -> Self {
        Self {
            max_amount,
            para_id,
            signer,
        }
    }

    /// SS58 address of the signing account.
    pub fn account(&self) -> String {
        self.signer.public_key().to_account_id().to_string()
    }
}

impl fmt::Debug for SubmissionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionRequest")
            .field("max_amount", &self.max_amount)
            .field("para_id", &self.para_id)
            .field("account", &self.account())
            .finish()
    }
}
