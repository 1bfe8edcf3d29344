//! Balance endpoint configuration
//!
//! Controls the JSON-RPC endpoint of each EVM network, the Solana RPC
//! endpoint and the Esplora API used for Bitcoin address lookups.
//! Defaults point at public mainnet endpoints.

use std::collections::HashMap;
use std::env;

use crate::chain::EvmNetwork;

#[derive(Clone, Debug)]
pub struct EndpointConfig {
    /// JSON-RPC URL per EVM network
    pub evm_rpc_urls: HashMap<EvmNetwork, String>,
    /// Solana JSON-RPC URL
    pub solana_rpc_url: String,
    /// Esplora API base URL
    pub esplora_url: String,
}

impl EndpointConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `EVM_RPC_ETHEREUM`, `EVM_RPC_ARBITRUM`, `EVM_RPC_OPTIMISM`,
    ///   `EVM_RPC_BASE`, `EVM_RPC_POLYGON`: per-network RPC overrides
    /// - `SOLANA_RPC_URL`: Solana RPC endpoint
    /// - `ESPLORA_URL`: Esplora API endpoint
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Point Bitcoin lookups at a local Esplora
    /// ESPLORA_URL=http://localhost:3002 cargo run
    /// ```
    pub fn from_env() -> Self {
        let mut config = Self::default();

        for network in EvmNetwork::ALL {
            let var = format!("EVM_RPC_{}", network.as_str().to_uppercase());
            if let Ok(url) = env::var(&var) {
                log::info!("🔗 {} RPC URL: {}", network, url);
                config.evm_rpc_urls.insert(network, url);
            }
        }

        if let Ok(url) = env::var("SOLANA_RPC_URL") {
            log::info!("🔗 Solana RPC URL: {}", url);
            config.solana_rpc_url = url;
        }

        if let Ok(url) = env::var("ESPLORA_URL") {
            log::info!("📡 Esplora URL: {}", url);
            config.esplora_url = url;
        }

        config
    }

    /// RPC URL for an EVM network
    pub fn evm_rpc_url(&self, network: EvmNetwork) -> Option<&str> {
        self.evm_rpc_urls.get(&network).map(String::as_str)
    }

    /// Every endpoint pointed at one base URL (for testing against a mock server)
    ///
    /// EVM networks get `{base}/{network}` so tests can tell them apart.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        let evm_rpc_urls = EvmNetwork::ALL
            .iter()
            .map(|network| (*network, format!("{}/{}", base, network.as_str().to_lowercase())))
            .collect();

        Self {
            evm_rpc_urls,
            solana_rpc_url: format!("{}/solana", base),
            esplora_url: format!("{}/esplora", base),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        let evm_rpc_urls = [
            (EvmNetwork::Ethereum, "https://eth.merkle.io"),
            (EvmNetwork::Arbitrum, "https://arb1.arbitrum.io/rpc"),
            (EvmNetwork::Optimism, "https://mainnet.optimism.io"),
            (EvmNetwork::Base, "https://mainnet.base.org"),
            (EvmNetwork::Polygon, "https://polygon-rpc.com"),
        ]
        .into_iter()
        .map(|(network, url)| (network, url.to_string()))
        .collect();

        Self {
            evm_rpc_urls,
            solana_rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            esplora_url: "https://blockstream.info/api".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_every_evm_network() {
        let config = EndpointConfig::default();
        for network in EvmNetwork::ALL {
            assert!(config.evm_rpc_url(network).is_some(), "missing {}", network);
        }
        assert_eq!(config.esplora_url, "https://blockstream.info/api");
    }

    #[test]
    fn test_base_url_layout() {
        let config = EndpointConfig::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(
            config.evm_rpc_url(EvmNetwork::Polygon),
            Some("http://127.0.0.1:9000/polygon")
        );
        assert_eq!(config.solana_rpc_url, "http://127.0.0.1:9000/solana");
        assert_eq!(config.esplora_url, "http://127.0.0.1:9000/esplora");
    }
}
