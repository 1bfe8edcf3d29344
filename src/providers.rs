//! Wallet provider capabilities
//!
//! Narrow interfaces over the injected wallet extensions. Each trait carries
//! exactly the calls the adapters make; a runtime without the extension
//! simply has no provider to inject.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::error::ProviderError;

/// EIP-1193 provider (MetaMask)
#[async_trait]
pub trait EthereumProvider: Send + Sync {
    /// Provider identifies itself as MetaMask
    fn is_metamask(&self) -> bool;

    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;
}

/// Phantom-style Solana provider
#[async_trait]
pub trait SolanaProvider: Send + Sync {
    fn is_phantom(&self) -> bool;

    /// Prompt for access; returns the base58 public key if one was granted
    async fn connect(&self) -> Result<Option<String>, ProviderError>;
}

/// Bitcoin wallet connector (Xverse)
#[async_trait]
pub trait BitcoinProvider: Send + Sync {
    fn is_installed(&self) -> bool;

    /// Payment addresses the user granted access to
    async fn get_accounts(&self, message: &str) -> Result<Vec<String>, ProviderError>;

    /// Aggregate UTXO balance in satoshis, `None` when the wallet reports none
    async fn get_balance(&self) -> Result<Option<u64>, ProviderError>;
}

/// CIP-30 wallet entry point (Eternl)
#[async_trait]
pub trait CardanoProvider: Send + Sync {
    async fn enable(&self) -> Result<Arc<dyn CardanoWalletApi>, ProviderError>;
}

/// CIP-30 API handle returned by `enable`
#[async_trait]
pub trait CardanoWalletApi: Send + Sync {
    /// Hex-encoded raw address bytes
    async fn get_change_address(&self) -> Result<String, ProviderError>;

    /// Hex-encoded CBOR `Value`
    async fn get_balance(&self) -> Result<String, ProviderError>;
}
