//! Shared test doubles for wallet provider capabilities and storage
//!
//! Each mock records how many times it was called so tests can assert
//! which balance source an adapter used.

#![allow(dead_code)]

use async_trait::async_trait;
use portfolio_wallets::providers::{
    BitcoinProvider, CardanoProvider, CardanoWalletApi, EthereumProvider, SolanaProvider,
};
use portfolio_wallets::{ProviderError, StorageBackend, StorageError};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const EVM_ADDRESS: &str = "0x742d35cc6634c0532925a3b844bc454e4438f44e";
pub const SOL_ADDRESS: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";
pub const BTC_ADDRESS: &str = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";

/// Enterprise mainnet Cardano address with a zero key hash, hex-encoded
pub fn cardano_address_hex() -> String {
    format!("61{}", "00".repeat(28))
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Ethereum
// ============================================================================

pub struct MockEthereum {
    pub is_metamask: bool,
    pub response: Result<Value, ProviderError>,
    pub calls: AtomicUsize,
}

impl MockEthereum {
    pub fn with_accounts(accounts: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            is_metamask: true,
            response: Ok(Value::from(
                accounts.iter().map(|a| Value::from(*a)).collect::<Vec<_>>(),
            )),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(err: ProviderError) -> Arc<Self> {
        Arc::new(Self {
            is_metamask: true,
            response: Err(err),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl EthereumProvider for MockEthereum {
    fn is_metamask(&self) -> bool {
        self.is_metamask
    }

    async fn request(&self, method: &str, _params: Value) -> Result<Value, ProviderError> {
        assert_eq!(method, "eth_requestAccounts");
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

// ============================================================================
// Solana
// ============================================================================

pub struct MockSolana {
    pub is_phantom: bool,
    pub public_key: Result<Option<String>, ProviderError>,
}

impl MockSolana {
    pub fn with_key(key: &str) -> Arc<Self> {
        Arc::new(Self {
            is_phantom: true,
            public_key: Ok(Some(key.to_string())),
        })
    }
}

#[async_trait]
impl SolanaProvider for MockSolana {
    fn is_phantom(&self) -> bool {
        self.is_phantom
    }

    async fn connect(&self) -> Result<Option<String>, ProviderError> {
        self.public_key.clone()
    }
}

// ============================================================================
// Bitcoin
// ============================================================================

pub struct MockBitcoin {
    pub accounts: Vec<String>,
    pub balance: Result<Option<u64>, ProviderError>,
    pub balance_calls: AtomicUsize,
}

impl MockBitcoin {
    pub fn new(accounts: &[&str], balance: Result<Option<u64>, ProviderError>) -> Arc<Self> {
        Arc::new(Self {
            accounts: accounts.iter().map(|a| a.to_string()).collect(),
            balance,
            balance_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl BitcoinProvider for MockBitcoin {
    fn is_installed(&self) -> bool {
        true
    }

    async fn get_accounts(&self, _message: &str) -> Result<Vec<String>, ProviderError> {
        Ok(self.accounts.clone())
    }

    async fn get_balance(&self) -> Result<Option<u64>, ProviderError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        self.balance.clone()
    }
}

// ============================================================================
// Cardano
// ============================================================================

pub struct MockCardanoApi {
    pub change_address_hex: String,
    pub balance_hex: String,
}

#[async_trait]
impl CardanoWalletApi for MockCardanoApi {
    async fn get_change_address(&self) -> Result<String, ProviderError> {
        Ok(self.change_address_hex.clone())
    }

    async fn get_balance(&self) -> Result<String, ProviderError> {
        Ok(self.balance_hex.clone())
    }
}

pub struct MockCardano {
    pub api: Result<Arc<MockCardanoApi>, ProviderError>,
}

impl MockCardano {
    pub fn with_balance(balance_hex: &str) -> Arc<Self> {
        Arc::new(Self {
            api: Ok(Arc::new(MockCardanoApi {
                change_address_hex: cardano_address_hex(),
                balance_hex: balance_hex.to_string(),
            })),
        })
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self {
            api: Err(ProviderError::Rejected("user declined".to_string())),
        })
    }
}

#[async_trait]
impl CardanoProvider for MockCardano {
    async fn enable(&self) -> Result<Arc<dyn CardanoWalletApi>, ProviderError> {
        match &self.api {
            Ok(api) => Ok(api.clone() as Arc<dyn CardanoWalletApi>),
            Err(e) => Err(e.clone()),
        }
    }
}

// ============================================================================
// Storage
// ============================================================================

/// Backend that refuses every operation (disabled storage)
pub struct BrokenStorage;

impl StorageBackend for BrokenStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }
}
