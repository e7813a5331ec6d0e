//! Operation data objects.
//!
//! One struct per operation kind, holding exactly the fields that appear in
//! the wire JSON. Each struct knows how to append its canonical binary form
//! to an [`Encoder`]; field order in the binary stream is the declared field
//! order and is part of the signed payload, so it must never change.

use crate::asset::AssetSymbol;
use beowulf_encoding::{EncodeError, Encoder};
use serde::{Deserialize, Serialize};

/// Transfer of funds between accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOperation {
    pub from: String,
    pub to: String,
    pub amount: String,
    pub fee: String,
    pub memo: String,
}

impl TransferOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_str(&self.from);
        enc.write_str(&self.to);
        enc.write_money(&self.amount);
        enc.write_money(&self.fee);
        enc.write_str(&self.memo);
    }
}

/// Convert liquid funds into vesting shares ("power up").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferToVestingOperation {
    pub from: String,
    pub to: String,
    pub amount: String,
    pub fee: String,
}

impl TransferToVestingOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_str(&self.from);
        enc.write_str(&self.to);
        enc.write_money(&self.amount);
        enc.write_money(&self.fee);
    }
}

/// Begin withdrawing vesting shares back to liquid funds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawVestingOperation {
    pub account: String,
    pub vesting_shares: String,
    pub fee: String,
}

impl WithdrawVestingOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_str(&self.account);
        enc.write_money(&self.vesting_shares);
        enc.write_money(&self.fee);
    }
}

/// Create a new account under an owner authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreateOperation {
    pub fee: String,
    pub creator: String,
    pub new_account_name: String,
    pub owner: crate::Authority,
    pub json_metadata: String,
}

impl AccountCreateOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_money(&self.fee);
        enc.write_str(&self.creator);
        enc.write_str(&self.new_account_name);
        self.owner.binary_encode(enc);
        enc.write_str(&self.json_metadata);
    }
}

/// Replace an account's owner authority and/or metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdateOperation {
    pub account: String,
    pub owner: Option<crate::Authority>,
    pub json_metadata: String,
    pub fee: String,
}

impl AccountUpdateOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_str(&self.account);
        // Optional authority: presence byte, then the value.
        match &self.owner {
            Some(owner) => {
                enc.write_bool(true);
                owner.binary_encode(enc);
            }
            None => enc.write_bool(false),
        }
        enc.write_str(&self.json_metadata);
        enc.write_money(&self.fee);
    }
}

/// Register or update a supernode (block producer) candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupernodeUpdateOperation {
    pub owner: String,
    pub block_signing_key: String,
    pub fee: String,
}

impl SupernodeUpdateOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_str(&self.owner);
        enc.write_str(&self.block_signing_key);
        enc.write_money(&self.fee);
    }
}

/// Vote for (or withdraw a vote from) a supernode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSupernodeVoteOperation {
    pub account: String,
    pub supernode: String,
    pub approve: bool,
    pub votes: i64,
    pub fee: String,
}

impl AccountSupernodeVoteOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_str(&self.account);
        enc.write_str(&self.supernode);
        enc.write_bool(self.approve);
        enc.write_i64(self.votes);
        enc.write_money(&self.fee);
    }
}

/// Create a smart media token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtCreateOperation {
    pub control_account: String,
    pub symbol: AssetSymbol,
    pub creator: String,
    pub smt_creation_fee: String,
    pub precision: u8,
    #[serde(default)]
    pub extensions: Vec<serde_json::Value>,
    pub max_supply: u64,
}

impl SmtCreateOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_str(&self.control_account);
        enc.write_u8(self.symbol.decimals);
        enc.write_str(&self.symbol.asset_name);
        enc.write_str(&self.creator);
        enc.write_money(&self.smt_creation_fee);
        enc.write_u8(self.precision);
        enc.write_varint(self.extensions.len() as u64);
        if !self.extensions.is_empty() {
            enc.fail(EncodeError::Unsupported("smt_create extensions"));
        }
        enc.write_u64(self.max_supply);
    }
}

/// Invoke a sidechain smart contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartContractOperation {
    pub owner: String,
    pub scid: String,
    pub sc_operation: String,
    pub fee: String,
}

impl SmartContractOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_str(&self.owner);
        enc.write_str(&self.scid);
        enc.write_str(&self.sc_operation);
        enc.write_money(&self.fee);
    }
}

/// Commit a sidechain state check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSidechainOperation {
    pub committer: String,
    pub csid: String,
    pub cs_operation: String,
    pub fee: String,
}

impl CheckSidechainOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_str(&self.committer);
        enc.write_str(&self.csid);
        enc.write_str(&self.cs_operation);
        enc.write_money(&self.fee);
    }
}

// Virtual operations: emitted by the chain, never submitted by clients.
// They still decode from API responses like any other kind.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillVestingWithdrawOperation {
    pub from_account: String,
    pub to_account: String,
    pub withdrawn: String,
    pub deposited: String,
}

impl FillVestingWithdrawOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_str(&self.from_account);
        enc.write_str(&self.to_account);
        enc.write_money(&self.withdrawn);
        enc.write_money(&self.deposited);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShutdownSupernodeOperation {
    pub owner: String,
}

impl ShutdownSupernodeOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_str(&self.owner);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardforkOperation {
    pub hardfork_id: u32,
}

impl HardforkOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_u32(self.hardfork_id);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerRewardOperation {
    pub producer: String,
    pub vesting_shares: String,
}

impl ProducerRewardOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_str(&self.producer);
        enc.write_money(&self.vesting_shares);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearNullAccountBalanceOperation {
    #[serde(default)]
    pub total_cleared: Vec<String>,
}

impl ClearNullAccountBalanceOperation {
    pub fn binary_encode(&self, enc: &mut Encoder) {
        enc.write_varint(self.total_cleared.len() as u64);
        for amount in &self.total_cleared {
            enc.write_money(amount);
        }
    }
}
