//! Beowulf chain API access.
//!
//! [`ChainBackend`] is the seam between the dispatch layer and the network;
//! [`HttpRpc`] is the JSON-RPC 2.0 implementation over HTTP. Network and
//! node errors surface verbatim as [`RpcError`] with no retries; whether and
//! how to retry is the caller's policy.

pub mod api;
pub mod client;
pub mod error;

pub use api::{AccountInfo, Block, BroadcastResponse, ChainBackend, DynamicGlobalProperties};
pub use client::{HttpRpc, RpcConfig};
pub use error::RpcError;
