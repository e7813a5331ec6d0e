//! High-level Beowulf client.
//!
//! Owns the configured signing keys and a [`beowulf_rpc::ChainBackend`],
//! assembles transactions with cached reference-block state, signs them, and
//! broadcasts. One call, one transaction: nothing here is reused or
//! re-signed.

pub mod client;
pub mod keys;
pub mod ops;
pub mod wallet;

pub use client::{BroadcastResult, Client, ClientConfig};
pub use keys::{required_roles, roles_for_all, Keys, Role};
pub use ops::OperationResponse;
pub use wallet::WalletData;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transaction has no operations")]
    NoOperations,

    #[error("no signing key configured for role '{0}'")]
    MissingKeys(&'static str),

    #[error("cannot determine signing roles for unknown operation code {0}")]
    UnknownOperation(u32),

    #[error("key error: {0}")]
    Key(#[from] beowulf_crypto::KeyError),

    #[error("transaction error: {0}")]
    Tx(#[from] beowulf_tx::TxError),

    #[error("rpc error: {0}")]
    Rpc(#[from] beowulf_rpc::RpcError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
