//! The transaction container.

use crate::operation::Operation;
use crate::time::TimePoint;
use beowulf_encoding::Encoder;
use serde::de::Error as _;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire code for the JSON-string extension kind.
pub const EXTENSION_JSON_CODE: u8 = 0;

/// Forward-compatible transaction side channel.
///
/// Serialized as the tuple `[code, payload]`; currently the only kind in use
/// carries a JSON string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub code: u8,
    pub value: String,
}

impl Extension {
    pub fn json(value: impl Into<String>) -> Self {
        Self {
            code: EXTENSION_JSON_CODE,
            value: value.into(),
        }
    }

    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_u8(self.code);
        enc.write_str(&self.value);
    }
}

impl Serialize for Extension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.code)?;
        tuple.serialize_element(&self.value)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Extension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (code, value): (u8, String) = Deserialize::deserialize(deserializer)?;
        if code != EXTENSION_JSON_CODE {
            return Err(D::Error::custom(format!("unknown extension code {}", code)));
        }
        Ok(Self { code, value })
    }
}

/// A transaction: replay-protection fields, ordered operations, and the
/// signatures collected over the canonical binary form.
///
/// Assembled once per send: operations pushed in call order, stamped with
/// the block reference and expiration, signed exactly once, then handed to
/// the broadcaster. Never reused or re-signed in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Low 16 bits of the referenced (already final) block height.
    pub ref_block_num: u16,
    /// u32 taken from the referenced block's hash; proves the builder
    /// observed that block and blocks replay against forked history.
    pub ref_block_prefix: u32,
    pub expiration: TimePoint,
    pub created_time: u64,
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub extensions: Vec<Extension>,
    #[serde(default)]
    pub signatures: Vec<String>,
}

impl Transaction {
    /// Append an operation, preserving caller order.
    pub fn push_operation(&mut self, op: Operation) {
        self.operations.push(op);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::TransferOperation;

    fn sample() -> Transaction {
        Transaction {
            ref_block_num: 0x1234,
            ref_block_prefix: 0xDEADBEEF,
            expiration: TimePoint::from_unix(1_700_003_540),
            created_time: 1_700_000_000,
            operations: vec![Operation::Transfer(TransferOperation {
                from: "alice".into(),
                to: "bob".into(),
                amount: "1.00000 W".into(),
                fee: "0.01000 W".into(),
                memo: "rent".into(),
            })],
            extensions: vec![Extension::json("{\"tag\":7}")],
            signatures: vec![],
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let tx = sample();
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }

    #[test]
    fn test_extension_tuple_form() {
        let json = serde_json::to_string(&Extension::json("x")).unwrap();
        assert_eq!(json, "[0,\"x\"]");
    }

    #[test]
    fn test_unknown_extension_code_rejected() {
        assert!(serde_json::from_str::<Extension>("[3,\"x\"]").is_err());
    }

    #[test]
    fn test_operation_order_preserved() {
        let mut tx = sample();
        tx.operations.clear();
        for name in ["a", "b", "c"] {
            tx.push_operation(Operation::Transfer(TransferOperation {
                from: name.into(),
                to: "bob".into(),
                amount: "1.00000 W".into(),
                fee: "0.01000 W".into(),
                memo: String::new(),
            }));
        }
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        let froms: Vec<_> = back
            .operations
            .iter()
            .map(|op| match op {
                Operation::Transfer(t) => t.from.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(froms, ["a", "b", "c"]);
    }
}
