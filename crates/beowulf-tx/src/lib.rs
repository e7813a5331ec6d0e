//! Beowulf transaction serialization and signing.
//!
//! Turns an assembled [`beowulf_types::Transaction`] into its canonical
//! binary form, computes the chain-bound signing digest, and collects one
//! deterministic signature per required key. Delegates low-level crypto to
//! beowulf-crypto.

pub mod refblock;
pub mod serialize;
pub mod sign;

pub use refblock::{ref_block_num, ref_block_prefix};
pub use serialize::serialize_transaction;
pub use sign::SignedTransaction;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("transaction has no operations")]
    NoOperations,

    #[error("transaction is already signed")]
    AlreadySigned,

    #[error("invalid block id '{0}'")]
    InvalidBlockId(String),

    #[error("invalid chain id '{0}'")]
    InvalidChainId(String),

    #[error("encoding error: {0}")]
    Encode(#[from] beowulf_encoding::EncodeError),

    #[error("key error: {0}")]
    Key(#[from] beowulf_crypto::KeyError),
}
