//! One-call wrappers for the common operations.
//!
//! Each builds a single-operation transaction and dispatches it through
//! [`Client::send_trx`] with the configured keys. Fees are caller-supplied
//! except where the chain prescribes a fixed creation fee.

use crate::client::{BroadcastResult, Client};
use crate::ClientError;
use beowulf_rpc::ChainBackend;
use beowulf_types::asset::AssetSymbol;
use beowulf_types::constants::TOKEN_CREATION_FEE;
use beowulf_types::ops::{
    AccountCreateOperation, AccountSupernodeVoteOperation, AccountUpdateOperation,
    CheckSidechainOperation, SmartContractOperation, SmtCreateOperation,
    SupernodeUpdateOperation, TransferOperation, TransferToVestingOperation,
    WithdrawVestingOperation,
};
use beowulf_types::{Authority, Operation};

/// A broadcast result tagged with the operation that produced it.
#[derive(Debug, Clone)]
pub struct OperationResponse {
    pub operation: &'static str,
    pub result: BroadcastResult,
}

impl<B: ChainBackend> Client<B> {
    async fn dispatch(
        &self,
        operation: &'static str,
        op: Operation,
    ) -> Result<OperationResponse, ClientError> {
        let result = self.send_trx(vec![op], None).await?;
        Ok(OperationResponse { operation, result })
    }

    /// Transfer funds to another account.
    pub async fn transfer(
        &self,
        from: &str,
        to: &str,
        memo: &str,
        amount: &str,
        fee: &str,
    ) -> Result<OperationResponse, ClientError> {
        self.dispatch(
            "transfer",
            Operation::Transfer(TransferOperation {
                from: from.to_string(),
                to: to.to_string(),
                amount: amount.to_string(),
                fee: fee.to_string(),
                memo: memo.to_string(),
            }),
        )
        .await
    }

    /// Convert liquid funds into vesting shares.
    pub async fn transfer_to_vesting(
        &self,
        from: &str,
        to: &str,
        amount: &str,
        fee: &str,
    ) -> Result<OperationResponse, ClientError> {
        self.dispatch(
            "transfer_to_vesting",
            Operation::TransferToVesting(TransferToVestingOperation {
                from: from.to_string(),
                to: to.to_string(),
                amount: amount.to_string(),
                fee: fee.to_string(),
            }),
        )
        .await
    }

    /// Start paying vesting shares back out.
    pub async fn withdraw_vesting(
        &self,
        account: &str,
        vesting_shares: &str,
        fee: &str,
    ) -> Result<OperationResponse, ClientError> {
        self.dispatch(
            "withdraw_vesting",
            Operation::WithdrawVesting(WithdrawVestingOperation {
                account: account.to_string(),
                vesting_shares: vesting_shares.to_string(),
                fee: fee.to_string(),
            }),
        )
        .await
    }

    /// Create an account controlled by a single existing public key.
    pub async fn account_create(
        &self,
        creator: &str,
        new_account_name: &str,
        public_key: &str,
        fee: &str,
    ) -> Result<OperationResponse, ClientError> {
        self.dispatch(
            "account_create",
            Operation::AccountCreate(AccountCreateOperation {
                fee: fee.to_string(),
                creator: creator.to_string(),
                new_account_name: new_account_name.to_string(),
                owner: Authority::single_key(public_key),
                json_metadata: String::new(),
            }),
        )
        .await
    }

    /// Create an account whose owner key is derived from a passphrase.
    pub async fn account_create_with_password(
        &self,
        creator: &str,
        new_account_name: &str,
        password: &str,
        fee: &str,
    ) -> Result<OperationResponse, ClientError> {
        let wallet = crate::wallet::account_keys(
            new_account_name,
            password,
            self.network().address_prefix(),
            &self.config().key_salt,
        )?;
        self.account_create(creator, new_account_name, &wallet.public_key, fee)
            .await
    }

    /// Create an account jointly owned by several keys; every key must sign.
    pub async fn create_multisig_account(
        &self,
        creator: &str,
        new_account_name: &str,
        fee: &str,
        owner_keys: &[String],
    ) -> Result<OperationResponse, ClientError> {
        self.dispatch(
            "account_create",
            Operation::AccountCreate(AccountCreateOperation {
                fee: fee.to_string(),
                creator: creator.to_string(),
                new_account_name: new_account_name.to_string(),
                owner: Authority::multisig(owner_keys),
                json_metadata: String::new(),
            }),
        )
        .await
    }

    /// Replace an account's owner authority with the given key set.
    pub async fn account_update(
        &self,
        account: &str,
        fee: &str,
        owner_keys: &[String],
    ) -> Result<OperationResponse, ClientError> {
        self.dispatch(
            "account_update",
            Operation::AccountUpdate(AccountUpdateOperation {
                account: account.to_string(),
                owner: Some(Authority::multisig(owner_keys)),
                json_metadata: String::new(),
                fee: fee.to_string(),
            }),
        )
        .await
    }

    /// Register or update a supernode's block-signing key.
    pub async fn supernode_update(
        &self,
        owner: &str,
        block_signing_key: &str,
        fee: &str,
    ) -> Result<OperationResponse, ClientError> {
        self.dispatch(
            "supernode_update",
            Operation::SupernodeUpdate(SupernodeUpdateOperation {
                owner: owner.to_string(),
                block_signing_key: block_signing_key.to_string(),
                fee: fee.to_string(),
            }),
        )
        .await
    }

    /// Vote for (or against) a supernode.
    pub async fn account_supernode_vote(
        &self,
        account: &str,
        supernode: &str,
        approve: bool,
        votes: i64,
        fee: &str,
    ) -> Result<OperationResponse, ClientError> {
        self.dispatch(
            "account_supernode_vote",
            Operation::AccountSupernodeVote(AccountSupernodeVoteOperation {
                account: account.to_string(),
                supernode: supernode.to_string(),
                approve,
                votes,
                fee: fee.to_string(),
            }),
        )
        .await
    }

    /// Create a new token. The creation fee is fixed by the chain.
    pub async fn create_token(
        &self,
        creator: &str,
        control_account: &str,
        token_name: &str,
        decimals: u8,
        max_supply: u64,
    ) -> Result<OperationResponse, ClientError> {
        self.dispatch(
            "smt_create",
            Operation::SmtCreate(SmtCreateOperation {
                control_account: control_account.to_string(),
                symbol: AssetSymbol {
                    decimals,
                    asset_name: token_name.to_string(),
                },
                creator: creator.to_string(),
                smt_creation_fee: TOKEN_CREATION_FEE.to_string(),
                precision: decimals,
                extensions: Vec::new(),
                max_supply,
            }),
        )
        .await
    }

    /// Submit a smart-contract call payload.
    pub async fn smart_contract(
        &self,
        owner: &str,
        scid: &str,
        sc_operation: &str,
        fee: &str,
    ) -> Result<OperationResponse, ClientError> {
        self.dispatch(
            "smart_contract",
            Operation::SmartContract(SmartContractOperation {
                owner: owner.to_string(),
                scid: scid.to_string(),
                sc_operation: sc_operation.to_string(),
                fee: fee.to_string(),
            }),
        )
        .await
    }

    /// Commit a sidechain checkpoint.
    pub async fn check_sidechain(
        &self,
        committer: &str,
        csid: &str,
        cs_operation: &str,
        fee: &str,
    ) -> Result<OperationResponse, ClientError> {
        self.dispatch(
            "check_sidechain",
            Operation::CheckSidechain(CheckSidechainOperation {
                committer: committer.to_string(),
                csid: csid.to_string(),
                cs_operation: cs_operation.to_string(),
                fee: fee.to_string(),
            }),
        )
        .await
    }

    /// Send several operations in one transaction. Signing roles come from
    /// the first operation.
    pub async fn multi_op(
        &self,
        ops: Vec<Operation>,
    ) -> Result<OperationResponse, ClientError> {
        let result = self.send_trx(ops, None).await?;
        Ok(OperationResponse {
            operation: "multi",
            result,
        })
    }
}
