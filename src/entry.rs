//! Stored wallet entries and their identity keys

use serde::{Deserialize, Serialize};

/// One provider-reported balance for one address on one network
///
/// Every field is optional to match what older payloads may contain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Decimal string with the chain's fixed display precision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl WalletEntry {
    pub fn new(address: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            network: Some(network.into()),
            ..Default::default()
        }
    }

    pub fn with_balance(mut self, balance: impl Into<String>) -> Self {
        self.balance = Some(balance.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Shallow merge: fields present in `newer` replace ours, absent ones are kept
    pub fn merged_with(&self, newer: &WalletEntry) -> WalletEntry {
        WalletEntry {
            address: newer.address.clone().or_else(|| self.address.clone()),
            balance: newer.balance.clone().or_else(|| self.balance.clone()),
            network: newer.network.clone().or_else(|| self.network.clone()),
            label: newer.label.clone().or_else(|| self.label.clone()),
        }
    }
}

/// Identity of an entry within one chain's list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WalletKey {
    /// EVM: one address may be tracked once per network
    ///
    /// `None` is the identity of legacy entries stored without a network.
    AddressOnNetwork {
        address: String,
        network: Option<String>,
    },
    /// Solana, Bitcoin, Cardano
    Address(String),
}

impl WalletKey {
    pub fn address(&self) -> &str {
        match self {
            Self::AddressOnNetwork { address, .. } => address,
            Self::Address(address) => address,
        }
    }

    /// Whether `entry` has this identity
    ///
    /// Hex EVM addresses compare case-insensitively (checksummed and
    /// lowercase forms are the same account). Base58 and bech32 addresses
    /// compare exactly.
    pub fn matches(&self, entry: &WalletEntry) -> bool {
        match self {
            Self::AddressOnNetwork { address, network } => {
                let same_address = entry
                    .address
                    .as_deref()
                    .is_some_and(|a| a.eq_ignore_ascii_case(address));
                same_address && entry.network == *network
            }
            Self::Address(address) => entry.address.as_deref() == Some(address.as_str()),
        }
    }
}
