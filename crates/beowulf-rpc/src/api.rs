//! The chain API surface the dispatch layer depends on.
//!
//! Node responses carry many fields the client never reads; the typed
//! structs keep the ones the transaction builder needs and fold the rest
//! into `extra`.

use crate::error::RpcError;
use async_trait::async_trait;
use beowulf_types::{TimePoint, Transaction};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Global chain state relevant to transaction assembly.
#[derive(Debug, Clone, Deserialize)]
pub struct DynamicGlobalProperties {
    pub head_block_number: u32,
    #[serde(default)]
    pub head_block_id: String,
    #[serde(default)]
    pub time: Option<TimePoint>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A block header as returned by the node. Only the id matters for the
/// reference-block prefix.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub block_id: String,
    #[serde(default)]
    pub previous: String,
    #[serde(default)]
    pub timestamp: Option<TimePoint>,
    #[serde(default)]
    pub supernode: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Acknowledgement of a broadcast transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastResponse {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// On-chain account state as returned by `get_accounts`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    pub name: String,
    #[serde(default)]
    pub owner: Option<beowulf_types::Authority>,
    #[serde(default)]
    pub balance: Option<beowulf_types::Asset>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// What the transaction builder needs from a node.
#[async_trait]
pub trait ChainBackend: Send + Sync {
    async fn dynamic_global_properties(&self) -> Result<DynamicGlobalProperties, RpcError>;

    async fn block(&self, num: u32) -> Result<Block, RpcError>;

    /// Fire-and-forget broadcast.
    async fn broadcast_transaction(&self, tx: &Transaction)
        -> Result<BroadcastResponse, RpcError>;

    /// Broadcast and wait for the node to validate and apply.
    async fn broadcast_transaction_synchronous(
        &self,
        tx: &Transaction,
    ) -> Result<BroadcastResponse, RpcError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dgp_keeps_unknown_fields() {
        let json = r#"{
            "head_block_number": 36029,
            "head_block_id": "0000010203040506aabbccdd00000000",
            "time": "20231114t221320",
            "current_supply": "1000.00000 W"
        }"#;
        let dgp: DynamicGlobalProperties = serde_json::from_str(json).unwrap();
        assert_eq!(dgp.head_block_number, 36029);
        assert!(dgp.extra.contains_key("current_supply"));
    }

    #[test]
    fn test_block_tolerates_minimal_response() {
        let block: Block = serde_json::from_str(r#"{"block_id":"aabb"}"#).unwrap();
        assert_eq!(block.block_id, "aabb");
        assert!(block.timestamp.is_none());
    }
}
