//! Supported chain families and EVM networks

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entry::WalletKey;
use crate::error::AdapterError;

/// Snapshot key of a chain family
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainKey {
    Eth,
    Sol,
    Btc,
    Ada,
}

impl ChainKey {
    pub const ALL: [ChainKey; 4] = [ChainKey::Eth, ChainKey::Sol, ChainKey::Btc, ChainKey::Ada];

    /// Key used in the persisted snapshot
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eth => "eth",
            Self::Sol => "sol",
            Self::Btc => "btc",
            Self::Ada => "ada",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Eth => "Ethereum",
            Self::Sol => "Solana",
            Self::Btc => "Bitcoin",
            Self::Ada => "Cardano",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Sol => "SOL",
            Self::Btc => "BTC",
            Self::Ada => "ADA",
        }
    }

    /// Decimals of the chain's base unit (wei, lamports, satoshis, lovelace)
    pub fn native_decimals(&self) -> u32 {
        match self {
            Self::Eth => 18,
            Self::Sol => 9,
            Self::Btc => 8,
            Self::Ada => 6,
        }
    }

    /// Fixed number of decimals stored for a balance
    pub fn display_precision(&self) -> u32 {
        match self {
            Self::Eth | Self::Sol => 4,
            Self::Btc => 8,
            Self::Ada => 6,
        }
    }

    /// Network tag written on entries of single-network chains
    ///
    /// EVM entries carry the selected [`EvmNetwork`] instead.
    pub fn default_network(&self) -> &'static str {
        match self {
            Self::Eth => EvmNetwork::Ethereum.as_str(),
            other => other.display_name(),
        }
    }

    /// Identity key of an entry on this chain
    ///
    /// EVM wallets are tracked once per network, and a missing network keys
    /// entries stored without one. Every other chain keys on the address alone.
    pub fn wallet_key(&self, address: &str, network: Option<&str>) -> WalletKey {
        match self {
            Self::Eth => WalletKey::AddressOnNetwork {
                address: address.to_string(),
                network: network.map(str::to_string),
            },
            _ => WalletKey::Address(address.to_string()),
        }
    }
}

impl fmt::Display for ChainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eth" => Ok(Self::Eth),
            "sol" => Ok(Self::Sol),
            "btc" => Ok(Self::Btc),
            "ada" => Ok(Self::Ada),
            other => Err(format!("unknown chain '{}'", other)),
        }
    }
}

/// EVM networks with their own RPC endpoint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvmNetwork {
    #[default]
    Ethereum,
    Arbitrum,
    Optimism,
    Base,
    Polygon,
}

impl EvmNetwork {
    pub const ALL: [EvmNetwork; 5] = [
        EvmNetwork::Ethereum,
        EvmNetwork::Arbitrum,
        EvmNetwork::Optimism,
        EvmNetwork::Base,
        EvmNetwork::Polygon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ethereum => "Ethereum",
            Self::Arbitrum => "Arbitrum",
            Self::Optimism => "Optimism",
            Self::Base => "Base",
            Self::Polygon => "Polygon",
        }
    }
}

impl fmt::Display for EvmNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvmNetwork {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EvmNetwork::ALL
            .iter()
            .copied()
            .find(|network| network.as_str() == s)
            .ok_or_else(|| AdapterError::UnknownNetwork(s.to_string()))
    }
}
