use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, RwLock};

use super::ChainAdapter;
use crate::chain::ChainKey;
use crate::config::EndpointConfig;
use crate::error::AdapterError;
use crate::providers::SolanaProvider;
use crate::rpc::JsonRpcClient;
use crate::units::Amount;

const WALLET: &str = "Phantom";

/// `getBalance` result: `{ context: { slot }, value: lamports }`
#[derive(Debug, Deserialize)]
struct BalanceResult {
    value: u64,
}

/// Phantom connect, balances over Solana JSON-RPC
pub struct SolanaAdapter {
    provider: Option<Arc<dyn SolanaProvider>>,
    rpc: JsonRpcClient,
    rpc_url: String,
    session: RwLock<Option<String>>,
}

impl SolanaAdapter {
    pub fn new(provider: Option<Arc<dyn SolanaProvider>>, config: &EndpointConfig) -> Self {
        Self {
            provider,
            rpc: JsonRpcClient::new(),
            rpc_url: config.solana_rpc_url.clone(),
            session: RwLock::new(None),
        }
    }
}

#[async_trait]
impl ChainAdapter for SolanaAdapter {
    fn chain(&self) -> ChainKey {
        ChainKey::Sol
    }

    fn wallet_label(&self) -> &'static str {
        WALLET
    }

    fn is_available(&self) -> bool {
        self.provider.as_ref().is_some_and(|p| p.is_phantom())
    }

    async fn connect(&self) -> Result<String, AdapterError> {
        let provider = self
            .provider
            .as_ref()
            .filter(|p| p.is_phantom())
            .ok_or_else(|| AdapterError::ProviderUnavailable(WALLET.to_string()))?;

        let address = provider
            .connect()
            .await
            .map_err(|e| AdapterError::from_provider(WALLET, e))?
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AdapterError::connection_failed("No account returned by Phantom"))?;

        log::info!("Connected Phantom account {}", address);
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = Some(address.clone());
        Ok(address)
    }

    fn connected_address(&self) -> Option<String> {
        self.session.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn validate_address(&self, address: &str) -> Result<(), AdapterError> {
        let bytes = ::bitcoin::base58::decode(address)
            .map_err(|e| AdapterError::invalid_address(format!("{}: {}", address, e)))?;
        if bytes.len() != 32 {
            return Err(AdapterError::invalid_address(format!(
                "{} decodes to {} bytes, expected 32",
                address,
                bytes.len()
            )));
        }
        Ok(())
    }

    async fn fetch_amount(
        &self,
        address: &str,
        _network: Option<&str>,
    ) -> Result<Amount, AdapterError> {
        self.validate_address(address)?;

        let result: BalanceResult = self
            .rpc
            .call(
                &self.rpc_url,
                "getBalance",
                json!([address, { "commitment": "confirmed" }]),
            )
            .await?;

        log::debug!("{}: {} lamports", address, result.value);
        Ok(Amount::new(result.value as u128, ChainKey::Sol.native_decimals()))
    }
}
