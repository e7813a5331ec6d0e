//! Crypto primitives for beowulf-rs.
//!
//! Deterministic key derivation, checksum-protected WIF/address encoding,
//! and RFC 6979 deterministic ECDSA over secp256k1.

pub mod keys;
pub mod sign;

pub use keys::{decode_private_key, derive_private_key, derive_public_key};
pub use sign::{recover_public_key, sign_digest, SIGNATURE_LEN};
pub use zeroize::Zeroizing;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid base58 encoding: {0}")]
    Base58(String),

    #[error("encoded key too short ({0} bytes)")]
    TooShort(usize),

    #[error("invalid key checksum")]
    InvalidChecksum,

    #[error("unexpected key payload length {0}")]
    InvalidPayload(usize),

    #[error("unsupported key version byte {0:#04x}")]
    UnsupportedVersion(u8),

    #[error("scalar is not a valid secp256k1 secret key")]
    InvalidScalar,

    #[error("signing failed")]
    SigningFailed,
}
