//! Deterministic ECDSA over secp256k1.
//!
//! Signatures use RFC 6979 deterministic nonces, so re-signing identical
//! bytes with the same key always yields the identical signature — required
//! for safe retry and idempotent resubmission. The wire form is 65 bytes:
//! one recovery byte (`recovery_id + 31`, compressed-key convention)
//! followed by `r || s`.

use crate::KeyError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

/// Length of a wire signature.
pub const SIGNATURE_LEN: usize = 65;

/// Offset added to the recovery id in the leading byte.
const RECOVERY_OFFSET: u8 = 31;

/// Sign a 32-byte digest with the given secret scalar.
pub fn sign_digest(digest: &[u8; 32], secret: &[u8; 32]) -> Result<[u8; SIGNATURE_LEN], KeyError> {
    let signing = SigningKey::from_bytes(secret.into()).map_err(|_| KeyError::InvalidScalar)?;
    let (signature, recovery_id) = signing
        .sign_prehash_recoverable(digest)
        .map_err(|_| KeyError::SigningFailed)?;

    let mut out = [0u8; SIGNATURE_LEN];
    out[0] = recovery_id.to_byte() + RECOVERY_OFFSET;
    out[1..].copy_from_slice(&signature.to_bytes());
    Ok(out)
}

/// Recover the compressed public key that produced a wire signature over a
/// digest. Used by verifiers and tests.
pub fn recover_public_key(
    digest: &[u8; 32],
    wire: &[u8; SIGNATURE_LEN],
) -> Result<Vec<u8>, KeyError> {
    let recovery_id = RecoveryId::from_byte(wire[0].wrapping_sub(RECOVERY_OFFSET))
        .ok_or(KeyError::SigningFailed)?;
    let signature = Signature::from_slice(&wire[1..]).map_err(|_| KeyError::SigningFailed)?;
    let key = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
        .map_err(|_| KeyError::SigningFailed)?;
    Ok(key.to_sec1_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{decode_private_key, derive_private_key};
    use sha2::{Digest, Sha256};

    fn test_key() -> [u8; 32] {
        let wif = derive_private_key("alice", "owner", "pw123", "S");
        *decode_private_key(&wif).unwrap()
    }

    #[test]
    fn test_signature_is_stable() {
        let digest: [u8; 32] = Sha256::digest(b"payload").into();
        let secret = test_key();
        let a = sign_digest(&digest, &secret).unwrap();
        let b = sign_digest(&digest, &secret).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_digests_differ() {
        let secret = test_key();
        let a = sign_digest(&Sha256::digest(b"one").into(), &secret).unwrap();
        let b = sign_digest(&Sha256::digest(b"two").into(), &secret).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_recover_matches_signer() {
        let digest: [u8; 32] = Sha256::digest(b"payload").into();
        let secret = test_key();
        let wire = sign_digest(&digest, &secret).unwrap();
        let recovered = recover_public_key(&digest, &wire).unwrap();

        let signing = SigningKey::from_bytes((&secret).into()).unwrap();
        assert_eq!(recovered, signing.verifying_key().to_sec1_bytes().to_vec());
    }

    #[test]
    fn test_zero_scalar_rejected() {
        let digest = [0x11u8; 32];
        assert!(matches!(
            sign_digest(&digest, &[0u8; 32]),
            Err(KeyError::InvalidScalar)
        ));
    }
}
