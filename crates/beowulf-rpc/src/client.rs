//! JSON-RPC 2.0 HTTP client.
//!
//! POSTs the standard envelope to the node URL and decodes the `result`
//! member into a typed response. Errors are returned to the caller as-is;
//! this layer never retries.

use crate::api::{
    AccountInfo, Block, BroadcastResponse, ChainBackend, DynamicGlobalProperties,
};
use crate::error::RpcError;
use async_trait::async_trait;
use beowulf_types::Transaction;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// JSON-RPC 2.0 request envelope.
#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

/// JSON-RPC 2.0 response envelope.
#[derive(Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Configuration for an RPC client.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Node URL (e.g., `https://bw.beowulfchain.com/rpc`).
    pub url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8376/rpc".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Async JSON-RPC client for a Beowulf node.
pub struct HttpRpc {
    client: reqwest::Client,
    config: RpcConfig,
    request_id: AtomicU64,
}

impl HttpRpc {
    /// Create a new client with the given node URL.
    pub fn new(url: &str) -> Self {
        Self::with_config(RpcConfig {
            url: url.trim_end_matches('/').to_string(),
            ..Default::default()
        })
    }

    /// Create a new client with full configuration.
    pub fn with_config(config: RpcConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(4)
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            config,
            request_id: AtomicU64::new(0),
        }
    }

    /// Get the configured node URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Call a JSON-RPC 2.0 method and decode its result.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, RpcError> {
        let req = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id(),
            method,
            params,
        };

        log::debug!("rpc call {} id={}", method, req.id);

        let resp = self
            .client
            .post(&self.config.url)
            .json(&req)
            .send()
            .await
            .map_err(|e| RpcError::Http {
                method: method.to_string(),
                source: e,
            })?;

        let status = resp.status().as_u16();
        if status >= 400 {
            let body = resp.text().await.unwrap_or_default();
            return Err(RpcError::HttpStatus {
                method: method.to_string(),
                status,
                body: body.chars().take(500).collect(),
            });
        }

        let body: JsonRpcResponse = resp.json().await.map_err(|e| RpcError::Http {
            method: method.to_string(),
            source: e,
        })?;

        if let Some(err) = body.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
                method: method.to_string(),
            });
        }

        let result = body.result.ok_or_else(|| RpcError::NoResult {
            method: method.to_string(),
        })?;
        Ok(serde_json::from_value(result)?)
    }

    /// Fetch on-chain state for the named accounts. Unknown names are
    /// simply absent from the result.
    pub async fn get_accounts(&self, names: &[&str]) -> Result<Vec<AccountInfo>, RpcError> {
        self.call("get_accounts", json!([names])).await
    }

    /// Look a transaction up by its ID.
    pub async fn get_transaction(&self, tx_id: &str) -> Result<Value, RpcError> {
        self.call("get_transaction", json!([tx_id])).await
    }
}

#[async_trait]
impl ChainBackend for HttpRpc {
    async fn dynamic_global_properties(&self) -> Result<DynamicGlobalProperties, RpcError> {
        self.call("get_dynamic_global_properties", json!([])).await
    }

    async fn block(&self, num: u32) -> Result<Block, RpcError> {
        self.call("get_block", json!([num])).await
    }

    async fn broadcast_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<BroadcastResponse, RpcError> {
        self.call("broadcast_transaction", json!([tx])).await
    }

    async fn broadcast_transaction_synchronous(
        &self,
        tx: &Transaction,
    ) -> Result<BroadcastResponse, RpcError> {
        self.call("broadcast_transaction_synchronous", json!([tx]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RpcConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_client_url_trimmed() {
        let client = HttpRpc::new("https://bw.beowulfchain.com/rpc/");
        assert_eq!(client.url(), "https://bw.beowulfchain.com/rpc");
    }

    #[test]
    fn test_request_ids_increment() {
        let client = HttpRpc::new("http://localhost:8376/rpc");
        let id1 = client.next_id();
        let id2 = client.next_id();
        assert_eq!(id2, id1 + 1);
    }

    #[test]
    fn test_envelope_shape() {
        let req = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 7,
            method: "get_block",
            params: json!([36029]),
        };
        let val = serde_json::to_value(&req).unwrap();
        assert_eq!(
            val,
            json!({"jsonrpc":"2.0","id":7,"method":"get_block","params":[36029]})
        );
    }
}
