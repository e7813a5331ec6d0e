//! Transaction assembly and dispatch.
//!
//! The only shared mutable state is the single-entry reference-block cache:
//! one `(fetched_at, head)` pair behind an async mutex. The check, refetch,
//! and store happen under one lock acquisition, so concurrent senders after
//! expiry produce one fetch, not a thundering herd. Everything else is
//! per-call and owned.

use crate::keys::{required_roles, Keys};
use crate::{ClientError, WalletData};
use beowulf_crypto::{decode_private_key, Zeroizing};
use beowulf_rpc::ChainBackend;
use beowulf_tx::{ref_block_num, ref_block_prefix, SignedTransaction};
use beowulf_types::constants::{HEAD_BLOCK_NUM_SPAN, REF_BLOCK_CACHE_TTL, TRANSACTION_EXPIRATION};
use beowulf_types::{Extension, Network, Operation, TimePoint, Transaction};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub network: Network,
    /// How long a fetched head block number is reused.
    pub ref_block_ttl: Duration,
    /// Validity window stamped on built transactions.
    pub expiration: Duration,
    /// Wallet-level salt mixed into deterministic key derivation.
    pub key_salt: String,
}

impl ClientConfig {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            ref_block_ttl: REF_BLOCK_CACHE_TTL,
            expiration: TRANSACTION_EXPIRATION,
            key_salt: String::new(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Network::Mainnet)
    }
}

/// Outcome of a broadcast: the node's acknowledgement id, the locally
/// derived transaction id, and the signed transaction as wire JSON.
#[derive(Debug, Clone)]
pub struct BroadcastResult {
    pub id: String,
    pub tx_id: String,
    pub json: String,
}

struct RefBlockEntry {
    fetched_at: Instant,
    head: u32,
}

/// High-level client over a chain backend.
pub struct Client<B> {
    backend: B,
    config: ClientConfig,
    keys: Keys,
    ref_block: Mutex<Option<RefBlockEntry>>,
}

impl<B: ChainBackend> Client<B> {
    pub fn new(backend: B, network: Network) -> Self {
        Self::with_config(backend, ClientConfig::new(network))
    }

    pub fn with_config(backend: B, config: ClientConfig) -> Self {
        Self {
            backend,
            config,
            keys: Keys::default(),
            ref_block: Mutex::new(None),
        }
    }

    /// Configure the signing keys used by [`Client::send_trx`].
    pub fn set_keys(&mut self, keys: Keys) {
        self.keys = keys;
    }

    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn network(&self) -> Network {
        self.config.network
    }

    /// Generate deterministic owner keys for a new account from a random
    /// passphrase, using the client's network prefix and key salt.
    pub fn generate_keys(&self, name: &str) -> Result<WalletData, ClientError> {
        Ok(crate::wallet::generate_keys(
            name,
            self.config.network.address_prefix(),
            &self.config.key_salt,
        )?)
    }

    /// The reference head block number, served from the cache while fresh.
    ///
    /// The safety span is subtracted from the live head so the referenced
    /// block is already final.
    pub async fn head_block_num(&self) -> Result<u32, ClientError> {
        let mut slot = self.ref_block.lock().await;
        if let Some(entry) = slot.as_ref() {
            if entry.fetched_at.elapsed() < self.config.ref_block_ttl {
                return Ok(entry.head);
            }
        }

        let props = self.backend.dynamic_global_properties().await?;
        let mut head = props.head_block_number;
        if head > HEAD_BLOCK_NUM_SPAN {
            head -= HEAD_BLOCK_NUM_SPAN;
        }
        log::debug!("ref block cache refreshed, head={}", head);
        *slot = Some(RefBlockEntry {
            fetched_at: Instant::now(),
            head,
        });
        Ok(head)
    }

    /// Assemble an unsigned transaction: resolve the reference block, stamp
    /// expiration and creation time, and attach at most one JSON extension.
    pub async fn prepare_transaction(
        &self,
        ops: Vec<Operation>,
        extension: Option<String>,
    ) -> Result<Transaction, ClientError> {
        if ops.is_empty() {
            return Err(ClientError::NoOperations);
        }

        let head = self.head_block_num().await?;
        let block = self.backend.block(head).await?;
        let prefix = ref_block_prefix(&block.block_id)?;

        let now = TimePoint::now();
        let mut tx = Transaction {
            ref_block_num: ref_block_num(head),
            ref_block_prefix: prefix,
            expiration: now.checked_add(self.config.expiration),
            created_time: now.unix() as u64,
            operations: Vec::new(),
            extensions: extension.into_iter().map(Extension::json).collect(),
            signatures: Vec::new(),
        };
        for op in ops {
            tx.push_operation(op);
        }
        Ok(tx)
    }

    /// Assemble, sign, and broadcast.
    ///
    /// Signing roles come from the first operation's kind; see
    /// [`crate::keys::roles_for_all`] for the cross-operation union. Any key
    /// or encoding failure aborts before the network is touched.
    pub async fn send_trx(
        &self,
        ops: Vec<Operation>,
        extension: Option<String>,
    ) -> Result<BroadcastResult, ClientError> {
        if ops.is_empty() {
            return Err(ClientError::NoOperations);
        }
        let signing = self.signing_keys(&ops[0])?;

        let tx = self.prepare_transaction(ops, extension).await?;
        let mut stx = SignedTransaction::new(tx);
        let tx_id = stx.sign(&signing, self.config.network.chain_id())?;
        log::debug!("signed transaction {}", tx_id);

        let resp = self
            .backend
            .broadcast_transaction_synchronous(&stx.transaction)
            .await?;
        log::info!("broadcast transaction {} accepted as {}", tx_id, resp.id);

        Ok(BroadcastResult {
            id: resp.id,
            tx_id,
            json: serde_json::to_string(&stx.transaction)?,
        })
    }

    /// Decode the configured keys for every role the operation requires.
    fn signing_keys(&self, op: &Operation) -> Result<Vec<Zeroizing<[u8; 32]>>, ClientError> {
        let kind = op
            .kind()
            .ok_or_else(|| ClientError::UnknownOperation(op.code()))?;

        let mut keys = Vec::new();
        for role in required_roles(kind) {
            let configured = self.keys.for_role(*role);
            if configured.is_empty() {
                return Err(ClientError::MissingKeys(role.name()));
            }
            for wif in configured {
                keys.push(decode_private_key(wif)?);
            }
        }
        Ok(keys)
    }
}
