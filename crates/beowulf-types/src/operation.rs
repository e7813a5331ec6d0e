//! The polymorphic operation model.
//!
//! Every operation kind has a stable numeric code used as both the JSON tag
//! and the binary tag. The wire-JSON form is a 2-element tuple
//! `[code, {fields...}]`. Codes are immutable once assigned: renumbering
//! would invalidate every historical signature.
//!
//! Decoding an unrecognized code is not an error — the raw payload is
//! preserved verbatim in [`Operation::Unknown`] so this client can pass
//! through operation kinds it does not understand. Binary-encoding an
//! Unknown operation *is* an error: no binary layout exists for it.

use crate::ops::*;
use beowulf_encoding::{EncodeError, Encoder};
use serde::de::Error as _;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

/// Closed enumeration of known operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Transfer,
    TransferToVesting,
    WithdrawVesting,
    AccountCreate,
    AccountUpdate,
    SupernodeUpdate,
    AccountSupernodeVote,
    SmtCreate,
    SmartContract,
    CheckSidechain,
    // Virtual kinds, produced by the chain only.
    FillVestingWithdraw,
    ShutdownSupernode,
    Hardfork,
    ProducerReward,
    ClearNullAccountBalance,
}

impl OpKind {
    /// Stable numeric wire code.
    pub fn code(&self) -> u32 {
        match self {
            OpKind::Transfer => 0,
            OpKind::TransferToVesting => 1,
            OpKind::WithdrawVesting => 2,
            OpKind::AccountCreate => 3,
            OpKind::AccountUpdate => 4,
            OpKind::SupernodeUpdate => 5,
            OpKind::AccountSupernodeVote => 6,
            OpKind::SmtCreate => 7,
            OpKind::SmartContract => 8,
            OpKind::CheckSidechain => 9,
            OpKind::FillVestingWithdraw => 10,
            OpKind::ShutdownSupernode => 11,
            OpKind::Hardfork => 12,
            OpKind::ProducerReward => 13,
            OpKind::ClearNullAccountBalance => 14,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            0 => OpKind::Transfer,
            1 => OpKind::TransferToVesting,
            2 => OpKind::WithdrawVesting,
            3 => OpKind::AccountCreate,
            4 => OpKind::AccountUpdate,
            5 => OpKind::SupernodeUpdate,
            6 => OpKind::AccountSupernodeVote,
            7 => OpKind::SmtCreate,
            8 => OpKind::SmartContract,
            9 => OpKind::CheckSidechain,
            10 => OpKind::FillVestingWithdraw,
            11 => OpKind::ShutdownSupernode,
            12 => OpKind::Hardfork,
            13 => OpKind::ProducerReward,
            14 => OpKind::ClearNullAccountBalance,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            OpKind::Transfer => "transfer",
            OpKind::TransferToVesting => "transfer_to_vesting",
            OpKind::WithdrawVesting => "withdraw_vesting",
            OpKind::AccountCreate => "account_create",
            OpKind::AccountUpdate => "account_update",
            OpKind::SupernodeUpdate => "supernode_update",
            OpKind::AccountSupernodeVote => "account_supernode_vote",
            OpKind::SmtCreate => "smt_create",
            OpKind::SmartContract => "smart_contract",
            OpKind::CheckSidechain => "check_sidechain",
            OpKind::FillVestingWithdraw => "fill_vesting_withdraw",
            OpKind::ShutdownSupernode => "shutdown_supernode",
            OpKind::Hardfork => "hardfork",
            OpKind::ProducerReward => "producer_reward",
            OpKind::ClearNullAccountBalance => "clear_null_account_balance",
        }
    }

    /// Virtual kinds are emitted by the chain and never carried in a
    /// client-submitted transaction.
    pub fn is_virtual(&self) -> bool {
        matches!(
            self,
            OpKind::FillVestingWithdraw
                | OpKind::ShutdownSupernode
                | OpKind::Hardfork
                | OpKind::ProducerReward
                | OpKind::ClearNullAccountBalance
        )
    }
}

/// Raw payload of an operation kind this client does not recognize.
///
/// The JSON text is kept exactly as received so re-encoding is
/// byte-identical.
#[derive(Debug, Clone)]
pub struct UnknownOperation {
    pub code: u32,
    pub data: Box<RawValue>,
}

impl PartialEq for UnknownOperation {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.data.get() == other.data.get()
    }
}

impl Eq for UnknownOperation {}

/// Tagged union over all operation kinds.
///
/// The variant always matches the reported kind; there is no way to
/// construct a mismatched pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Transfer(TransferOperation),
    TransferToVesting(TransferToVestingOperation),
    WithdrawVesting(WithdrawVestingOperation),
    AccountCreate(AccountCreateOperation),
    AccountUpdate(AccountUpdateOperation),
    SupernodeUpdate(SupernodeUpdateOperation),
    AccountSupernodeVote(AccountSupernodeVoteOperation),
    SmtCreate(SmtCreateOperation),
    SmartContract(SmartContractOperation),
    CheckSidechain(CheckSidechainOperation),
    FillVestingWithdraw(FillVestingWithdrawOperation),
    ShutdownSupernode(ShutdownSupernodeOperation),
    Hardfork(HardforkOperation),
    ProducerReward(ProducerRewardOperation),
    ClearNullAccountBalance(ClearNullAccountBalanceOperation),
    Unknown(UnknownOperation),
}

impl Operation {
    /// The operation kind, or `None` for an unrecognized code.
    pub fn kind(&self) -> Option<OpKind> {
        Some(match self {
            Operation::Transfer(_) => OpKind::Transfer,
            Operation::TransferToVesting(_) => OpKind::TransferToVesting,
            Operation::WithdrawVesting(_) => OpKind::WithdrawVesting,
            Operation::AccountCreate(_) => OpKind::AccountCreate,
            Operation::AccountUpdate(_) => OpKind::AccountUpdate,
            Operation::SupernodeUpdate(_) => OpKind::SupernodeUpdate,
            Operation::AccountSupernodeVote(_) => OpKind::AccountSupernodeVote,
            Operation::SmtCreate(_) => OpKind::SmtCreate,
            Operation::SmartContract(_) => OpKind::SmartContract,
            Operation::CheckSidechain(_) => OpKind::CheckSidechain,
            Operation::FillVestingWithdraw(_) => OpKind::FillVestingWithdraw,
            Operation::ShutdownSupernode(_) => OpKind::ShutdownSupernode,
            Operation::Hardfork(_) => OpKind::Hardfork,
            Operation::ProducerReward(_) => OpKind::ProducerReward,
            Operation::ClearNullAccountBalance(_) => OpKind::ClearNullAccountBalance,
            Operation::Unknown(_) => return None,
        })
    }

    /// The numeric wire code, defined for every variant including Unknown.
    pub fn code(&self) -> u32 {
        match self {
            Operation::Unknown(u) => u.code,
            other => other.kind().map(|k| k.code()).unwrap_or_default(),
        }
    }

    /// Append the canonical binary form: varint code, then the fields in
    /// declared order. Unknown operations poison the encoder.
    pub fn binary_encode(&self, enc: &mut Encoder) {
        if let Operation::Unknown(u) = self {
            enc.fail(EncodeError::UnknownOperation(u.code));
            return;
        }
        enc.write_varint(self.code() as u64);
        match self {
            Operation::Transfer(op) => op.binary_encode(enc),
            Operation::TransferToVesting(op) => op.binary_encode(enc),
            Operation::WithdrawVesting(op) => op.binary_encode(enc),
            Operation::AccountCreate(op) => op.binary_encode(enc),
            Operation::AccountUpdate(op) => op.binary_encode(enc),
            Operation::SupernodeUpdate(op) => op.binary_encode(enc),
            Operation::AccountSupernodeVote(op) => op.binary_encode(enc),
            Operation::SmtCreate(op) => op.binary_encode(enc),
            Operation::SmartContract(op) => op.binary_encode(enc),
            Operation::CheckSidechain(op) => op.binary_encode(enc),
            Operation::FillVestingWithdraw(op) => op.binary_encode(enc),
            Operation::ShutdownSupernode(op) => op.binary_encode(enc),
            Operation::Hardfork(op) => op.binary_encode(enc),
            Operation::ProducerReward(op) => op.binary_encode(enc),
            Operation::ClearNullAccountBalance(op) => op.binary_encode(enc),
            Operation::Unknown(_) => unreachable!("handled above"),
        }
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.code())?;
        match self {
            Operation::Transfer(op) => tuple.serialize_element(op)?,
            Operation::TransferToVesting(op) => tuple.serialize_element(op)?,
            Operation::WithdrawVesting(op) => tuple.serialize_element(op)?,
            Operation::AccountCreate(op) => tuple.serialize_element(op)?,
            Operation::AccountUpdate(op) => tuple.serialize_element(op)?,
            Operation::SupernodeUpdate(op) => tuple.serialize_element(op)?,
            Operation::AccountSupernodeVote(op) => tuple.serialize_element(op)?,
            Operation::SmtCreate(op) => tuple.serialize_element(op)?,
            Operation::SmartContract(op) => tuple.serialize_element(op)?,
            Operation::CheckSidechain(op) => tuple.serialize_element(op)?,
            Operation::FillVestingWithdraw(op) => tuple.serialize_element(op)?,
            Operation::ShutdownSupernode(op) => tuple.serialize_element(op)?,
            Operation::Hardfork(op) => tuple.serialize_element(op)?,
            Operation::ProducerReward(op) => tuple.serialize_element(op)?,
            Operation::ClearNullAccountBalance(op) => tuple.serialize_element(op)?,
            Operation::Unknown(u) => tuple.serialize_element(&u.data)?,
        }
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (code, raw): (u32, Box<RawValue>) = Deserialize::deserialize(deserializer)?;

        fn parse<'de, T, D>(raw: &RawValue) -> Result<T, D::Error>
        where
            T: serde::de::DeserializeOwned,
            D: Deserializer<'de>,
        {
            serde_json::from_str(raw.get())
                .map_err(|e| D::Error::custom(format!("malformed operation data: {}", e)))
        }

        let kind = match OpKind::from_code(code) {
            Some(kind) => kind,
            None => return Ok(Operation::Unknown(UnknownOperation { code, data: raw })),
        };

        Ok(match kind {
            OpKind::Transfer => Operation::Transfer(parse::<_, D>(&raw)?),
            OpKind::TransferToVesting => Operation::TransferToVesting(parse::<_, D>(&raw)?),
            OpKind::WithdrawVesting => Operation::WithdrawVesting(parse::<_, D>(&raw)?),
            OpKind::AccountCreate => Operation::AccountCreate(parse::<_, D>(&raw)?),
            OpKind::AccountUpdate => Operation::AccountUpdate(parse::<_, D>(&raw)?),
            OpKind::SupernodeUpdate => Operation::SupernodeUpdate(parse::<_, D>(&raw)?),
            OpKind::AccountSupernodeVote => {
                Operation::AccountSupernodeVote(parse::<_, D>(&raw)?)
            }
            OpKind::SmtCreate => Operation::SmtCreate(parse::<_, D>(&raw)?),
            OpKind::SmartContract => Operation::SmartContract(parse::<_, D>(&raw)?),
            OpKind::CheckSidechain => Operation::CheckSidechain(parse::<_, D>(&raw)?),
            OpKind::FillVestingWithdraw => Operation::FillVestingWithdraw(parse::<_, D>(&raw)?),
            OpKind::ShutdownSupernode => Operation::ShutdownSupernode(parse::<_, D>(&raw)?),
            OpKind::Hardfork => Operation::Hardfork(parse::<_, D>(&raw)?),
            OpKind::ProducerReward => Operation::ProducerReward(parse::<_, D>(&raw)?),
            OpKind::ClearNullAccountBalance => {
                Operation::ClearNullAccountBalance(parse::<_, D>(&raw)?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transfer() -> Operation {
        Operation::Transfer(TransferOperation {
            from: "alice".into(),
            to: "bob".into(),
            amount: "1.00000 W".into(),
            fee: "0.01000 W".into(),
            memo: "".into(),
        })
    }

    #[test]
    fn test_codes_are_stable() {
        // These values are part of the signed wire format. Changing any of
        // them invalidates historical signatures.
        let expected = [
            (OpKind::Transfer, 0),
            (OpKind::TransferToVesting, 1),
            (OpKind::WithdrawVesting, 2),
            (OpKind::AccountCreate, 3),
            (OpKind::AccountUpdate, 4),
            (OpKind::SupernodeUpdate, 5),
            (OpKind::AccountSupernodeVote, 6),
            (OpKind::SmtCreate, 7),
            (OpKind::SmartContract, 8),
            (OpKind::CheckSidechain, 9),
            (OpKind::FillVestingWithdraw, 10),
            (OpKind::ShutdownSupernode, 11),
            (OpKind::Hardfork, 12),
            (OpKind::ProducerReward, 13),
            (OpKind::ClearNullAccountBalance, 14),
        ];
        for (kind, code) in expected {
            assert_eq!(kind.code(), code);
            assert_eq!(OpKind::from_code(code), Some(kind));
        }
        assert_eq!(OpKind::from_code(15), None);
    }

    #[test]
    fn test_json_tuple_shape() {
        let json = serde_json::to_string(&sample_transfer()).unwrap();
        assert!(json.starts_with("[0,{"), "got {}", json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_json_roundtrip_every_kind() {
        let ops = vec![
            sample_transfer(),
            Operation::TransferToVesting(TransferToVestingOperation {
                from: "alice".into(),
                to: "alice".into(),
                amount: "10.00000 W".into(),
                fee: "0.01000 W".into(),
            }),
            Operation::WithdrawVesting(WithdrawVestingOperation {
                account: "alice".into(),
                vesting_shares: "5.000000 M".into(),
                fee: "0.01000 W".into(),
            }),
            Operation::AccountCreate(AccountCreateOperation {
                fee: "1.00000 W".into(),
                creator: "alice".into(),
                new_account_name: "carol".into(),
                owner: crate::Authority::single_key("BEO7key"),
                json_metadata: "".into(),
            }),
            Operation::AccountUpdate(AccountUpdateOperation {
                account: "carol".into(),
                owner: Some(crate::Authority::single_key("BEO8key")),
                json_metadata: "{}".into(),
                fee: "0.01000 W".into(),
            }),
            Operation::SupernodeUpdate(SupernodeUpdateOperation {
                owner: "alice".into(),
                block_signing_key: "BEO9key".into(),
                fee: "0.01000 W".into(),
            }),
            Operation::AccountSupernodeVote(AccountSupernodeVoteOperation {
                account: "alice".into(),
                supernode: "nodeop".into(),
                approve: true,
                votes: 42,
                fee: "0.01000 W".into(),
            }),
            Operation::SmtCreate(SmtCreateOperation {
                control_account: "alice".into(),
                symbol: crate::asset::AssetSymbol {
                    decimals: 5,
                    asset_name: "ABC".into(),
                },
                creator: "alice".into(),
                smt_creation_fee: "1000.00000 W".into(),
                precision: 5,
                extensions: vec![],
                max_supply: 1_000_000,
            }),
            Operation::SmartContract(SmartContractOperation {
                owner: "alice".into(),
                scid: "sc-1".into(),
                sc_operation: "{\"call\":\"init\"}".into(),
                fee: "0.01000 W".into(),
            }),
            Operation::CheckSidechain(CheckSidechainOperation {
                committer: "alice".into(),
                csid: "cs-1".into(),
                cs_operation: "commit".into(),
                fee: "0.01000 W".into(),
            }),
            Operation::FillVestingWithdraw(FillVestingWithdrawOperation {
                from_account: "alice".into(),
                to_account: "alice".into(),
                withdrawn: "1.000000 M".into(),
                deposited: "1.00000 W".into(),
            }),
            Operation::ShutdownSupernode(ShutdownSupernodeOperation {
                owner: "nodeop".into(),
            }),
            Operation::Hardfork(HardforkOperation { hardfork_id: 2 }),
            Operation::ProducerReward(ProducerRewardOperation {
                producer: "nodeop".into(),
                vesting_shares: "0.100000 M".into(),
            }),
            Operation::ClearNullAccountBalance(ClearNullAccountBalanceOperation {
                total_cleared: vec!["0.00100 W".into()],
            }),
        ];
        for op in ops {
            let json = serde_json::to_string(&op).unwrap();
            let back: Operation = serde_json::from_str(&json).unwrap();
            assert_eq!(back, op, "roundtrip failed for {}", json);
        }
    }

    #[test]
    fn test_unknown_kind_preserved_verbatim() {
        let wire = r#"[99,{"mystery":"payload","nested":{"a":[1,2,3]}}]"#;
        let op: Operation = serde_json::from_str(wire).unwrap();
        let Operation::Unknown(ref u) = op else {
            panic!("expected Unknown, got {:?}", op);
        };
        assert_eq!(u.code, 99);
        assert!(op.kind().is_none());
        // Re-encoding must be byte-identical.
        assert_eq!(serde_json::to_string(&op).unwrap(), wire);
    }

    #[test]
    fn test_known_kind_malformed_data_is_hard_error() {
        let wire = r#"[0,{"from":12}]"#;
        assert!(serde_json::from_str::<Operation>(wire).is_err());
    }

    #[test]
    fn test_html_characters_stay_literal() {
        let op = Operation::Transfer(TransferOperation {
            from: "alice".into(),
            to: "bob".into(),
            amount: "1.00000 W".into(),
            fee: "0.01000 W".into(),
            memo: "<b>&amp;</b>".into(),
        });
        let json = serde_json::to_string(&op).unwrap();
        assert!(json.contains("<b>&amp;</b>"));
    }

    #[test]
    fn test_unknown_binary_encode_fails() {
        let wire = r#"[99,{"x":1}]"#;
        let op: Operation = serde_json::from_str(wire).unwrap();
        let mut enc = Encoder::new();
        op.binary_encode(&mut enc);
        assert!(matches!(
            enc.finalize().unwrap_err(),
            EncodeError::UnknownOperation(99)
        ));
    }

    #[test]
    fn test_transfer_binary_golden_vector() {
        let mut enc = Encoder::new();
        sample_transfer().binary_encode(&mut enc);
        let bytes = enc.finalize().unwrap();

        let mut expected = Vec::new();
        expected.push(0x00); // varint transfer code
        expected.extend_from_slice(b"\x05alice");
        expected.extend_from_slice(b"\x03bob");
        // amount: 100000 LE, precision 5, "W" padded to 7
        expected.extend_from_slice(&100_000i64.to_le_bytes());
        expected.push(5);
        expected.extend_from_slice(&[0x57, 0, 0, 0, 0, 0, 0]);
        // fee: 1000 LE, precision 5, "W"
        expected.extend_from_slice(&1_000i64.to_le_bytes());
        expected.push(5);
        expected.extend_from_slice(&[0x57, 0, 0, 0, 0, 0, 0]);
        // empty memo
        expected.push(0x00);

        assert_eq!(bytes, expected);
    }
}
