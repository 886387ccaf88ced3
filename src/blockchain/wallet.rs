//! Submitter credential loading.
//!
//! # Security
//! - Secrets are loaded ONLY from environment variables
//! - Secrets are never logged or serialized; only the derived address is

use std::str::FromStr;

use subxt_signer::sr25519::Keypair;
use subxt_signer::SecretUri;

use crate::blockchain::types::{ChainError, ChainResult};

/// Name of the variable holding `network`'s secret.
pub fn env_var_name(prefix: &str, network: &str) -> String {
    format!("{}{}", prefix, network.to_uppercase())
}

/// Derive an sr25519 keypair from a secret URI, mnemonic or hex seed.
pub fn keypair_from_secret(var: &str, secret: &str) -> ChainResult<Keypair> {
    let invalid = |reason: String| ChainError::InvalidCredential {
        var: var.to_string(),
        reason,
    };

    let uri = SecretUri::from_str(secret.trim()).map_err(|e| invalid(e.to_string()))?;
    Keypair::from_uri(&uri).map_err(|e| invalid(e.to_string()))
}

/// Resolve `network`'s keypair through `lookup`.
///
/// Missing and empty variables are both reported as missing.
pub fn keypair_from_lookup<F>(prefix: &str, network: &str, lookup: F) -> ChainResult<Keypair>
where
    F: Fn(&str) -> Option<String>,
{
    let var = env_var_name(prefix, network);
    let secret = lookup(&var)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ChainError::MissingCredential {
            network: network.to_string(),
            var: var.clone(),
        })?;

    let keypair = keypair_from_secret(&var, &secret)?;

    tracing::debug!(
        network = network,
        account = %keypair.public_key().to_account_id(),
        "Submitter key loaded"
    );

    Ok(keypair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use subxt_signer::sr25519::dev;

    const PREFIX: &str = "SUBMITTER_KEY_";

    fn expect_err(result: ChainResult<Keypair>) -> ChainError {
        match result {
            Ok(_) => panic!("expected a credential error"),
            Err(e) => e,
        }
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(env_var_name(PREFIX, "paseo"), "SUBMITTER_KEY_PASEO");
    }

    #[test]
    fn test_dev_uri() {
        let keypair = keypair_from_lookup(PREFIX, "paseo", |var| {
            assert_eq!(var, "SUBMITTER_KEY_PASEO");
            Some("//Alice".to_string())
        })
        .unwrap();
        assert_eq!(keypair.public_key().0, dev::alice().public_key().0);
    }

    #[test]
    fn test_missing_key() {
        let err = expect_err(keypair_from_lookup(PREFIX, "kusama", |_| None));
        assert!(matches!(
            err,
            ChainError::MissingCredential { ref var, .. } if var == "SUBMITTER_KEY_KUSAMA"
        ));
    }

    #[test]
    fn test_empty_key_is_missing() {
        let err = expect_err(keypair_from_lookup(PREFIX, "kusama", |_| Some("  ".into())));
        assert!(matches!(err, ChainError::MissingCredential { .. }));
    }

    #[test]
    fn test_invalid_key() {
        let err = expect_err(keypair_from_secret("SUBMITTER_KEY_PASEO", "0xnothex"));
        match err {
            ChainError::InvalidCredential { var, .. } => assert_eq!(var, "SUBMITTER_KEY_PASEO"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
