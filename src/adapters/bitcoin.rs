use ::bitcoin::address::NetworkUnchecked;
use ::bitcoin::Address;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use super::ChainAdapter;
use crate::chain::ChainKey;
use crate::config::EndpointConfig;
use crate::error::AdapterError;
use crate::esplora::EsploraClient;
use crate::providers::BitcoinProvider;
use crate::units::Amount;

const WALLET: &str = "Xverse";
const ACCESS_MESSAGE: &str = "Allow read access to your balance.";

/// Xverse connect; balance from the wallet session, else from Esplora
pub struct BitcoinAdapter {
    provider: Option<Arc<dyn BitcoinProvider>>,
    esplora: EsploraClient,
    session: RwLock<Option<String>>,
}

impl BitcoinAdapter {
    pub fn new(provider: Option<Arc<dyn BitcoinProvider>>, config: &EndpointConfig) -> Self {
        Self {
            provider,
            esplora: EsploraClient::new(config.esplora_url.clone()),
            session: RwLock::new(None),
        }
    }

    /// Aggregate balance reported by the connected wallet, if any
    ///
    /// A zero total counts as no answer and falls through to Esplora.
    async fn wallet_sats(&self, address: &str) -> Option<u64> {
        if self.connected_address().as_deref() != Some(address) {
            return None;
        }
        let provider = self.provider.as_ref()?;

        match provider.get_balance().await {
            Ok(total) => total.filter(|sats| *sats > 0),
            Err(e) => {
                log::debug!("Xverse balance unavailable, using Esplora: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl ChainAdapter for BitcoinAdapter {
    fn chain(&self) -> ChainKey {
        ChainKey::Btc
    }

    fn wallet_label(&self) -> &'static str {
        WALLET
    }

    fn is_available(&self) -> bool {
        self.provider.as_ref().is_some_and(|p| p.is_installed())
    }

    async fn connect(&self) -> Result<String, AdapterError> {
        let provider = self
            .provider
            .as_ref()
            .filter(|p| p.is_installed())
            .ok_or_else(|| AdapterError::ProviderUnavailable(WALLET.to_string()))?;

        let address = provider
            .get_accounts(ACCESS_MESSAGE)
            .await
            .map_err(|e| AdapterError::from_provider(WALLET, e))?
            .into_iter()
            .find(|a| !a.is_empty())
            .ok_or_else(|| AdapterError::connection_failed("No address returned by Xverse"))?;

        log::info!("Connected Xverse payment address {}", address);
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = Some(address.clone());
        Ok(address)
    }

    fn connected_address(&self) -> Option<String> {
        self.session.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn validate_address(&self, address: &str) -> Result<(), AdapterError> {
        address
            .parse::<Address<NetworkUnchecked>>()
            .map(|_| ())
            .map_err(|e| AdapterError::invalid_address(format!("{}: {}", address, e)))
    }

    async fn fetch_amount(
        &self,
        address: &str,
        _network: Option<&str>,
    ) -> Result<Amount, AdapterError> {
        let decimals = ChainKey::Btc.native_decimals();

        if let Some(sats) = self.wallet_sats(address).await {
            log::debug!("{}: {} sats (wallet)", address, sats);
            return Ok(Amount::new(sats as u128, decimals));
        }

        let sats = self.esplora.get_confirmed_sats(address).await?;
        Ok(Amount::from_signed(sats, decimals))
    }
}
