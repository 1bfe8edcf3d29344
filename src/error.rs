//! Error types for wallet aggregation
//!
//! Adapter errors are surfaced to the user as messages at the action
//! boundary. Storage errors never leave the snapshot store.

use thiserror::Error;

/// Failure of a chain adapter operation
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum AdapterError {
    /// The wallet provider (extension) is not present in this runtime
    #[error("{0} is not available")]
    ProviderUnavailable(String),

    /// The user declined the provider's permission prompt
    #[error("Request rejected in {0}")]
    UserRejected(String),

    /// Provider call failed or returned no usable account
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Network, API or decoding failure while reading a balance
    #[error("Balance query failed: {0}")]
    BalanceQueryFailed(String),

    /// The address has no balance source (Cardano without a session)
    #[error("Balance unavailable without a connected wallet")]
    BalanceUnavailable,

    /// Address rejected before any query was made
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Network name not supported by the adapter
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}

impl AdapterError {
    pub fn connection_failed(msg: impl Into<String>) -> Self {
        Self::ConnectionFailed(msg.into())
    }

    pub fn balance_query_failed(msg: impl Into<String>) -> Self {
        Self::BalanceQueryFailed(msg.into())
    }

    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::InvalidAddress(msg.into())
    }

    /// Map a provider failure onto the connect taxonomy
    pub fn from_provider(wallet: &str, err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected(_) => Self::UserRejected(wallet.to_string()),
            ProviderError::Failed(msg) => Self::ConnectionFailed(msg),
        }
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        Self::BalanceQueryFailed(err.to_string())
    }
}

/// Error reported by an injected wallet provider
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ProviderError {
    /// User denied the request (EIP-1193 code 4001 and equivalents)
    #[error("User rejected the request: {0}")]
    Rejected(String),

    #[error("Provider error: {0}")]
    Failed(String),
}

/// Persistence failure (read or write)
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend refused the operation (disabled storage, quota)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
