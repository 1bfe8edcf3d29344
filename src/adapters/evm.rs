use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::ChainAdapter;
use crate::chain::{ChainKey, EvmNetwork};
use crate::config::EndpointConfig;
use crate::error::AdapterError;
use crate::providers::EthereumProvider;
use crate::rpc::JsonRpcClient;
use crate::units::{parse_hex_quantity, Amount};

const WALLET: &str = "MetaMask";

/// MetaMask connect, balances over each network's public RPC
pub struct EvmAdapter {
    provider: Option<Arc<dyn EthereumProvider>>,
    rpc: JsonRpcClient,
    rpc_urls: HashMap<EvmNetwork, String>,
    session: RwLock<Option<String>>,
}

impl EvmAdapter {
    pub fn new(provider: Option<Arc<dyn EthereumProvider>>, config: &EndpointConfig) -> Self {
        Self {
            provider,
            rpc: JsonRpcClient::new(),
            rpc_urls: config.evm_rpc_urls.clone(),
            session: RwLock::new(None),
        }
    }

    fn rpc_url(&self, network: EvmNetwork) -> Result<&str, AdapterError> {
        self.rpc_urls
            .get(&network)
            .map(String::as_str)
            .ok_or_else(|| AdapterError::UnknownNetwork(network.to_string()))
    }
}

#[async_trait]
impl ChainAdapter for EvmAdapter {
    fn chain(&self) -> ChainKey {
        ChainKey::Eth
    }

    fn wallet_label(&self) -> &'static str {
        WALLET
    }

    fn is_available(&self) -> bool {
        self.provider.as_ref().is_some_and(|p| p.is_metamask())
    }

    async fn connect(&self) -> Result<String, AdapterError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| AdapterError::ProviderUnavailable(WALLET.to_string()))?;

        let accounts = provider
            .request("eth_requestAccounts", json!([]))
            .await
            .map_err(|e| AdapterError::from_provider(WALLET, e))?;

        let address = match accounts {
            Value::Array(items) => items
                .into_iter()
                .next()
                .and_then(|v| v.as_str().map(str::to_string))
                .filter(|a| !a.is_empty()),
            _ => None,
        }
        .ok_or_else(|| AdapterError::connection_failed("No account returned by MetaMask"))?;

        log::info!("Connected MetaMask account {}", address);
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = Some(address.clone());
        Ok(address)
    }

    fn connected_address(&self) -> Option<String> {
        self.session.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn validate_address(&self, address: &str) -> Result<(), AdapterError> {
        let digits = address
            .strip_prefix("0x")
            .ok_or_else(|| AdapterError::invalid_address(format!("{} is not 0x-prefixed", address)))?;
        if digits.len() != 40 || hex::decode(digits).is_err() {
            return Err(AdapterError::invalid_address(format!(
                "{} is not a 20-byte hex address",
                address
            )));
        }
        Ok(())
    }

    async fn fetch_amount(
        &self,
        address: &str,
        network: Option<&str>,
    ) -> Result<Amount, AdapterError> {
        self.validate_address(address)?;
        let network = match network {
            Some(name) => name.parse::<EvmNetwork>()?,
            None => EvmNetwork::default(),
        };
        let url = self.rpc_url(network)?;

        let quantity: String = self
            .rpc
            .call(url, "eth_getBalance", json!([address, "latest"]))
            .await?;
        let wei = parse_hex_quantity(&quantity).map_err(AdapterError::BalanceQueryFailed)?;

        log::debug!("{} on {}: {} wei", address, network, wei);
        Ok(Amount::new(wei, ChainKey::Eth.native_decimals()))
    }
}
