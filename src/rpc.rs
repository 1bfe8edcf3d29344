//! Minimal JSON-RPC 2.0 client for balance reads

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AdapterError;

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Clone)]
pub struct JsonRpcClient {
    client: reqwest::Client,
}

impl JsonRpcClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Single call, no retries
    pub async fn call<T: DeserializeOwned>(
        &self,
        url: &str,
        method: &str,
        params: Value,
    ) -> Result<T, AdapterError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        log::debug!("RPC {} -> {}", method, url);

        let response = self.client.post(url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(AdapterError::balance_query_failed(format!(
                "{} returned HTTP {}",
                method,
                response.status()
            )));
        }

        let rpc: RpcResponse<T> = response.json().await?;

        if let Some(err) = rpc.error {
            return Err(AdapterError::balance_query_failed(format!(
                "{} failed ({}): {}",
                method, err.code, err.message
            )));
        }

        rpc.result
            .ok_or_else(|| AdapterError::balance_query_failed(format!("{} returned no result", method)))
    }
}

impl Default for JsonRpcClient {
    fn default() -> Self {
        Self::new()
    }
}
