//! Deterministic wallet key material.
//!
//! Keys are reproducible from `(account, role, passphrase, salt)`; a wallet
//! can be rebuilt from those inputs alone.

use beowulf_crypto::{derive_private_key, derive_public_key, KeyError};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The only key role currently issued for new accounts.
pub const OWNER_ROLE: &str = "owner";

const PASSPHRASE_LEN: usize = 16;

/// An account name with its owner key pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletData {
    pub name: String,
    pub private_key: String,
    pub public_key: String,
}

/// Owner keys for a new account from a freshly generated random passphrase.
pub fn generate_keys(name: &str, prefix: &str, salt: &str) -> Result<WalletData, KeyError> {
    let passphrase: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PASSPHRASE_LEN)
        .map(char::from)
        .collect();
    account_keys(name, &passphrase, prefix, salt)
}

/// Deterministic owner keys for an account and passphrase.
pub fn account_keys(
    name: &str,
    passphrase: &str,
    prefix: &str,
    salt: &str,
) -> Result<WalletData, KeyError> {
    let private_key = derive_private_key(name, OWNER_ROLE, passphrase, salt);
    let public_key = derive_public_key(prefix, &private_key)?;
    Ok(WalletData {
        name: name.to_string(),
        private_key,
        public_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_keys_are_deterministic() {
        let a = account_keys("alice", "pw123", "BEO", "").unwrap();
        let b = account_keys("alice", "pw123", "BEO", "").unwrap();
        assert_eq!(a.private_key, b.private_key);
        assert_eq!(a.public_key, b.public_key);
    }

    #[test]
    fn test_salt_changes_keys() {
        let a = account_keys("alice", "pw123", "BEO", "").unwrap();
        let b = account_keys("alice", "pw123", "BEO", "pepper").unwrap();
        assert_ne!(a.private_key, b.private_key);
    }

    #[test]
    fn test_generated_keys_carry_prefix_and_differ() {
        let a = generate_keys("alice", "BEO", "").unwrap();
        let b = generate_keys("alice", "BEO", "").unwrap();
        assert!(a.public_key.starts_with("BEO"));
        // Random passphrases make collisions vanishingly unlikely.
        assert_ne!(a.private_key, b.private_key);
    }
}
