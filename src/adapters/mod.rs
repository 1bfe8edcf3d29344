//! Chain adapters
//!
//! - EVM (MetaMask + per-network JSON-RPC)
//! - Solana (Phantom + JSON-RPC)
//! - Bitcoin (Xverse + Esplora fallback)
//! - Cardano (Eternl, CIP-30)
//!
//! Every adapter turns its provider/API quirks into the same
//! `connect -> address`, `get_balance -> fixed decimal string` contract.

pub mod bitcoin;
pub mod cardano;
pub mod evm;
pub mod solana;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::chain::ChainKey;
use crate::config::EndpointConfig;
use crate::error::AdapterError;
use crate::providers::{BitcoinProvider, CardanoProvider, EthereumProvider, SolanaProvider};
use crate::units::Amount;

pub use self::bitcoin::BitcoinAdapter;
pub use cardano::CardanoAdapter;
pub use evm::EvmAdapter;
pub use solana::SolanaAdapter;

/// Uniform contract over one chain family
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    fn chain(&self) -> ChainKey;

    /// Name of the wallet extension, stored as the label of connected entries
    fn wallet_label(&self) -> &'static str;

    /// Whether the expected provider is present; never fails
    fn is_available(&self) -> bool;

    /// Ask the provider for access and return the granted address
    async fn connect(&self) -> Result<String, AdapterError>;

    /// Address recorded by the last successful `connect`
    fn connected_address(&self) -> Option<String>;

    /// Syntactic check of a manually entered address
    fn validate_address(&self, address: &str) -> Result<(), AdapterError>;

    /// Balance in base units
    async fn fetch_amount(&self, address: &str, network: Option<&str>)
        -> Result<Amount, AdapterError>;

    /// Balance rendered with the chain's fixed precision
    async fn get_balance(&self, address: &str, network: Option<&str>) -> Result<String, AdapterError> {
        let amount = self.fetch_amount(address, network).await?;
        Ok(amount.to_fixed(self.chain().display_precision()))
    }
}

/// Presence of each chain's provider in the current runtime
///
/// Recomputed on every call, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAvailability {
    pub eth: bool,
    pub sol: bool,
    pub btc: bool,
    pub ada: bool,
}

impl ProviderAvailability {
    pub fn get(&self, chain: ChainKey) -> bool {
        match chain {
            ChainKey::Eth => self.eth,
            ChainKey::Sol => self.sol,
            ChainKey::Btc => self.btc,
            ChainKey::Ada => self.ada,
        }
    }
}

/// Provider capabilities injected by the host runtime
///
/// All `None` in a runtime without wallet extensions (e.g. a server).
#[derive(Clone, Default)]
pub struct Providers {
    pub ethereum: Option<Arc<dyn EthereumProvider>>,
    pub solana: Option<Arc<dyn SolanaProvider>>,
    pub bitcoin: Option<Arc<dyn BitcoinProvider>>,
    pub cardano: Option<Arc<dyn CardanoProvider>>,
}

/// One adapter per chain family
pub struct ChainAdapters {
    evm: EvmAdapter,
    solana: SolanaAdapter,
    bitcoin: BitcoinAdapter,
    cardano: CardanoAdapter,
}

impl ChainAdapters {
    pub fn new(providers: Providers, config: &EndpointConfig) -> Self {
        Self {
            evm: EvmAdapter::new(providers.ethereum, config),
            solana: SolanaAdapter::new(providers.solana, config),
            bitcoin: BitcoinAdapter::new(providers.bitcoin, config),
            cardano: CardanoAdapter::new(providers.cardano),
        }
    }

    pub fn get(&self, chain: ChainKey) -> &dyn ChainAdapter {
        match chain {
            ChainKey::Eth => &self.evm,
            ChainKey::Sol => &self.solana,
            ChainKey::Btc => &self.bitcoin,
            ChainKey::Ada => &self.cardano,
        }
    }

    pub fn availability(&self) -> ProviderAvailability {
        ProviderAvailability {
            eth: self.evm.is_available(),
            sol: self.solana.is_available(),
            btc: self.bitcoin.is_available(),
            ada: self.cardano.is_available(),
        }
    }
}
