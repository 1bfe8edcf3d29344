//! Esplora address lookups
//!
//! Balance of an address is `funded_txo_sum - spent_txo_sum` over confirmed
//! chain stats.

use serde::{Deserialize, Serialize};

use crate::error::AdapterError;

/// Response of `GET /address/{address}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressInfo {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub chain_stats: TxoStats,
    #[serde(default)]
    pub mempool_stats: TxoStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxoStats {
    #[serde(default)]
    pub funded_txo_sum: u64,
    #[serde(default)]
    pub spent_txo_sum: u64,
    #[serde(default)]
    pub tx_count: u64,
}

impl TxoStats {
    /// Funded minus spent, in satoshis (may be negative on bad data)
    pub fn net_sats(&self) -> i128 {
        self.funded_txo_sum as i128 - self.spent_txo_sum as i128
    }
}

#[derive(Clone)]
pub struct EsploraClient {
    client: reqwest::Client,
    base_url: String,
}

impl EsploraClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_address_info(&self, address: &str) -> Result<AddressInfo, AdapterError> {
        let url = format!("{}/address/{}", self.base_url, address);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AdapterError::balance_query_failed(format!(
                "Esplora returned HTTP {} for {}",
                response.status(),
                address
            )));
        }

        let info: AddressInfo = response.json().await?;
        Ok(info)
    }

    /// Confirmed balance in satoshis
    pub async fn get_confirmed_sats(&self, address: &str) -> Result<i128, AdapterError> {
        let info = self.get_address_info(address).await?;
        log::debug!(
            "Esplora {}: funded={} spent={}",
            address,
            info.chain_stats.funded_txo_sum,
            info.chain_stats.spent_txo_sum
        );
        Ok(info.chain_stats.net_sats())
    }
}
