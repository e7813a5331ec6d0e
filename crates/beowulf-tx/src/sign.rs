//! The signing engine.
//!
//! Wraps an assembled transaction, computes the chain-bound digest
//! `SHA256(chain_id ++ canonical_bytes)`, and appends one deterministic
//! signature per key. The transaction ID is the first 20 bytes of
//! `SHA256(canonical_bytes)` (no chain id), hex-encoded.

use crate::serialize::serialize_transaction;
use crate::TxError;
use beowulf_crypto::Zeroizing;
use beowulf_types::Transaction;
use sha2::{Digest, Sha256};

/// Bytes of the transaction digest that form the transaction ID.
const TX_ID_LEN: usize = 20;

/// A transaction in the signing stage.
///
/// Signatures are appended, never replaced: a transaction is signed exactly
/// once and handed to the broadcaster.
#[derive(Debug)]
pub struct SignedTransaction {
    pub transaction: Transaction,
}

impl SignedTransaction {
    pub fn new(transaction: Transaction) -> Self {
        Self { transaction }
    }

    /// Canonical binary bytes of the wrapped transaction.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TxError> {
        if self.transaction.operations.is_empty() {
            return Err(TxError::NoOperations);
        }
        Ok(serialize_transaction(&self.transaction)?)
    }

    /// The signing digest: SHA256 over the chain id followed by the
    /// canonical bytes, so a signature can never replay on a sibling
    /// network.
    pub fn digest(&self, chain_id: &str) -> Result<[u8; 32], TxError> {
        let chain_raw =
            hex::decode(chain_id).map_err(|_| TxError::InvalidChainId(chain_id.to_string()))?;
        let bytes = self.to_bytes()?;
        let mut hasher = Sha256::new();
        hasher.update(&chain_raw);
        hasher.update(&bytes);
        Ok(hasher.finalize().into())
    }

    /// The derived transaction ID: first 20 bytes of the transaction
    /// digest, hex-encoded.
    pub fn tx_id(&self) -> Result<String, TxError> {
        let bytes = self.to_bytes()?;
        let digest = Sha256::digest(&bytes);
        Ok(hex::encode(&digest[..TX_ID_LEN]))
    }

    /// Sign with every supplied key, appending signatures in key order, and
    /// return the transaction ID.
    ///
    /// Any encoding or key failure aborts before a single signature is
    /// attached; an under-signed transaction is never produced.
    pub fn sign(
        &mut self,
        keys: &[Zeroizing<[u8; 32]>],
        chain_id: &str,
    ) -> Result<String, TxError> {
        if !self.transaction.signatures.is_empty() {
            return Err(TxError::AlreadySigned);
        }
        let digest = self.digest(chain_id)?;

        let mut signatures = Vec::with_capacity(keys.len());
        for key in keys {
            let wire = beowulf_crypto::sign_digest(&digest, key)?;
            signatures.push(hex::encode(wire));
        }
        self.transaction.signatures = signatures;
        self.tx_id()
    }
}
