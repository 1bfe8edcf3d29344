//! Common test utilities for portfolio manager and API tests
//!
//! This module provides shared test infrastructure including:
//! - A manager wired to a temp-dir snapshot store and a mock RPC/Esplora server
//! - Mock wallet providers
//! - Constants for valid addresses on each chain
#![allow(dead_code)]

use async_trait::async_trait;
use portfolio_wallets::providers::{CardanoProvider, CardanoWalletApi, EthereumProvider};
use portfolio_wallets::{
    ChainAdapters, EndpointConfig, ProviderError, Providers, SnapshotStore,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use wallet::manager::PortfolioManager;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const EVM_ADDRESS: &str = "0x742d35cc6634c0532925a3b844bc454e4438f44e";
pub const BTC_ADDRESS: &str = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";
pub const BTC_ADDRESS_2: &str = "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2";

pub fn init_logger() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

/// Test environment with a temp snapshot directory
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub server: MockServer,
    /// Shares its backend with the manager's store
    pub store: SnapshotStore,
    pub manager: Arc<PortfolioManager>,
}

impl TestEnvironment {
    pub async fn new(providers: Providers) -> anyhow::Result<Self> {
        init_logger();
        let temp_dir = TempDir::new()?;
        log::info!("📁 Test directory: {:?}", temp_dir.path());

        let server = MockServer::start().await;
        let adapters = ChainAdapters::new(providers, &EndpointConfig::with_base_url(&server.uri()));
        let store = SnapshotStore::on_disk(temp_dir.path().to_path_buf());
        let manager = Arc::new(PortfolioManager::with_parts(adapters, store.clone()));

        Ok(Self {
            temp_dir,
            server,
            store,
            manager,
        })
    }

    /// Answer `eth_getBalance` on one EVM network path
    pub async fn mount_evm_balance(&self, network_path: &str, wei_hex: &str) {
        Mock::given(method("POST"))
            .and(path(network_path))
            .and(body_partial_json(json!({ "method": "eth_getBalance" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": wei_hex,
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_esplora(&self, address: &str, funded: u64, spent: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/esplora/address/{}", address)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "address": address,
                "chain_stats": { "funded_txo_sum": funded, "spent_txo_sum": spent, "tx_count": 1 },
                "mempool_stats": { "funded_txo_sum": 0, "spent_txo_sum": 0, "tx_count": 0 },
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

// ============================================================================
// Mock providers
// ============================================================================

pub struct MockMetaMask {
    pub accounts: Vec<String>,
}

impl MockMetaMask {
    pub fn with_account(address: &str) -> Arc<Self> {
        Arc::new(Self {
            accounts: vec![address.to_string()],
        })
    }
}

#[async_trait]
impl EthereumProvider for MockMetaMask {
    fn is_metamask(&self) -> bool {
        true
    }

    async fn request(&self, _method: &str, _params: Value) -> Result<Value, ProviderError> {
        Ok(json!(self.accounts))
    }
}

pub struct MockEternlApi {
    pub address_hex: String,
    pub balance_hex: String,
}

#[async_trait]
impl CardanoWalletApi for MockEternlApi {
    async fn get_change_address(&self) -> Result<String, ProviderError> {
        Ok(self.address_hex.clone())
    }

    async fn get_balance(&self) -> Result<String, ProviderError> {
        Ok(self.balance_hex.clone())
    }
}

pub struct MockEternl {
    pub api: Arc<MockEternlApi>,
}

impl MockEternl {
    /// Enterprise mainnet address with a zero key hash
    pub fn with_balance(balance_hex: &str) -> Arc<Self> {
        Arc::new(Self {
            api: Arc::new(MockEternlApi {
                address_hex: format!("61{}", "00".repeat(28)),
                balance_hex: balance_hex.to_string(),
            }),
        })
    }
}

#[async_trait]
impl CardanoProvider for MockEternl {
    async fn enable(&self) -> Result<Arc<dyn CardanoWalletApi>, ProviderError> {
        Ok(self.api.clone() as Arc<dyn CardanoWalletApi>)
    }
}
