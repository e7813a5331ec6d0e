//! Account authorities.

use beowulf_encoding::Encoder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A weighted authority: the transaction is authorized once the summed
/// weights of satisfied auths reach `weight_threshold`.
///
/// Auth maps are ordered (BTreeMap) so the binary form is canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    pub weight_threshold: u32,
    pub account_auths: BTreeMap<String, u16>,
    pub key_auths: BTreeMap<String, u16>,
}

impl Authority {
    /// Single-key authority with threshold 1.
    pub fn single_key(public_key: &str) -> Self {
        let mut key_auths = BTreeMap::new();
        key_auths.insert(public_key.to_string(), 1);
        Self {
            weight_threshold: 1,
            account_auths: BTreeMap::new(),
            key_auths,
        }
    }

    /// N-of-N multisig authority: every listed key has weight 1 and the
    /// threshold equals the key count.
    pub fn multisig(public_keys: &[String]) -> Self {
        let key_auths: BTreeMap<String, u16> =
            public_keys.iter().map(|k| (k.clone(), 1)).collect();
        Self {
            weight_threshold: key_auths.len() as u32,
            account_auths: BTreeMap::new(),
            key_auths,
        }
    }

    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_u32(self.weight_threshold);
        enc.write_varint(self.account_auths.len() as u64);
        for (account, weight) in &self.account_auths {
            enc.write_str(account);
            enc.write_u16(*weight);
        }
        enc.write_varint(self.key_auths.len() as u64);
        for (key, weight) in &self.key_auths {
            enc.write_str(key);
            enc.write_u16(*weight);
        }
    }
}
