//! Beowulf network constants and per-network configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Network type identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Chain ID mixed into the signing digest so signatures cannot replay
    /// across sibling networks.
    pub fn chain_id(&self) -> &'static str {
        match self {
            Network::Mainnet => {
                "430b37f23cf146d42f15376f341d7f8f5a1ad6f4e63affdeb5dc61d55d8c95a7"
            }
            Network::Testnet => {
                "18dcf0a285365fc58b71f18b3d3fec954aa0c141c44e4e5cb4cf777b9eab274e"
            }
        }
    }

    /// Human-readable prefix prepended to encoded public keys.
    pub fn address_prefix(&self) -> &'static str {
        match self {
            Network::Mainnet => "BEO",
            Network::Testnet => "TST",
        }
    }
}

/// Native asset symbol.
pub const NATIVE_SYMBOL: &str = "W";

/// Vesting-share asset symbol.
pub const VESTING_SYMBOL: &str = "M";

/// How long a built transaction stays valid after creation.
pub const TRANSACTION_EXPIRATION: Duration = Duration::from_secs(59 * 60);

/// Subtracted from the live head so the referenced block is already final.
pub const HEAD_BLOCK_NUM_SPAN: u32 = 10;

/// How long a fetched head block number may be reused before refetching.
pub const REF_BLOCK_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Flat fee attached to ordinary operations.
pub const BASE_FEE: &str = "0.01000 W";

/// Fee charged for creating an account.
pub const ACCOUNT_CREATION_FEE: &str = "1.00000 W";

/// Fee charged for creating a token.
pub const TOKEN_CREATION_FEE: &str = "1000.00000 W";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_ids_are_distinct_32_byte_hex() {
        for net in [Network::Mainnet, Network::Testnet] {
            assert_eq!(net.chain_id().len(), 64);
            assert!(net.chain_id().bytes().all(|b| b.is_ascii_hexdigit()));
        }
        assert_ne!(Network::Mainnet.chain_id(), Network::Testnet.chain_id());
    }
}
