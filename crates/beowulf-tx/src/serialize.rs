//! Canonical binary transaction layout.
//!
//! This is the signing payload; the layout must reproduce bit for bit on
//! every verifier. Signatures are never part of it.
//!
//! ```text
//! ref_block_num     u16 LE
//! ref_block_prefix  u32 LE
//! expiration        u32 LE (Unix seconds)
//! created_time      u64 LE (Unix seconds)
//! operations        varint count, then each op (varint code + fields)
//! extensions        varint count, then each extension (code + string)
//! ```

use beowulf_encoding::{EncodeError, Encoder};
use beowulf_types::Transaction;

/// Append the canonical form of a transaction to an encoder.
pub fn write_transaction(tx: &Transaction, enc: &mut Encoder) {
    enc.write_u16(tx.ref_block_num);
    enc.write_u32(tx.ref_block_prefix);
    enc.write_u32(tx.expiration.as_u32());
    enc.write_u64(tx.created_time);
    enc.write_varint(tx.operations.len() as u64);
    for op in &tx.operations {
        op.binary_encode(enc);
    }
    enc.write_varint(tx.extensions.len() as u64);
    for ext in &tx.extensions {
        ext.binary_encode(enc);
    }
}

/// Serialize a transaction to its canonical bytes.
pub fn serialize_transaction(tx: &Transaction) -> Result<Vec<u8>, EncodeError> {
    let mut enc = Encoder::new();
    write_transaction(tx, &mut enc);
    enc.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use beowulf_types::ops::TransferOperation;
    use beowulf_types::{Extension, Operation, TimePoint};

    fn sample_tx() -> Transaction {
        Transaction {
            ref_block_num: 0x1234,
            ref_block_prefix: 0xCAFEBABE,
            expiration: TimePoint::from_unix(1_700_003_540),
            created_time: 1_700_000_000,
            operations: vec![Operation::Transfer(TransferOperation {
                from: "alice".into(),
                to: "bob".into(),
                amount: "1.00000 W".into(),
                fee: "0.01000 W".into(),
                memo: String::new(),
            })],
            extensions: vec![],
            signatures: vec![],
        }
    }

    #[test]
    fn test_header_layout() {
        let bytes = serialize_transaction(&sample_tx()).unwrap();
        assert_eq!(&bytes[..2], &0x1234u16.to_le_bytes());
        assert_eq!(&bytes[2..6], &0xCAFEBABEu32.to_le_bytes());
        assert_eq!(&bytes[6..10], &1_700_003_540u32.to_le_bytes());
        assert_eq!(&bytes[10..18], &1_700_000_000u64.to_le_bytes());
        // one operation
        assert_eq!(bytes[18], 1);
        // transfer code
        assert_eq!(bytes[19], 0);
    }

    #[test]
    fn test_extension_appended_after_operations() {
        let mut tx = sample_tx();
        tx.extensions.push(Extension::json("meta"));
        let plain = serialize_transaction(&sample_tx()).unwrap();
        let with_ext = serialize_transaction(&tx).unwrap();

        // Same prefix up to the extension count, which flips from 0 to 1.
        let cut = plain.len() - 1;
        assert_eq!(&with_ext[..cut], &plain[..cut]);
        assert_eq!(plain[cut], 0);
        assert_eq!(with_ext[cut], 1);
        // extension code + length-prefixed payload
        assert_eq!(&with_ext[cut + 1..], b"\x00\x04meta");
    }

    #[test]
    fn test_signatures_not_serialized() {
        let mut tx = sample_tx();
        let unsigned = serialize_transaction(&tx).unwrap();
        tx.signatures.push("aa".repeat(65));
        assert_eq!(serialize_transaction(&tx).unwrap(), unsigned);
    }

    #[test]
    fn test_bad_amount_surfaces_encode_error() {
        let mut tx = sample_tx();
        if let Operation::Transfer(ref mut t) = tx.operations[0] {
            t.amount = "one W".into();
        }
        assert!(serialize_transaction(&tx).is_err());
    }
}
