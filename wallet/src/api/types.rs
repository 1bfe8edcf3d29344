use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct AddAddressRequest {
    pub address: String,
    /// EVM network name; ignored by the other chains
    #[serde(default)]
    pub network: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RefreshEntryRequest {
    pub address: String,
    #[serde(default)]
    pub network: Option<String>,
}

/// Query of `DELETE /api/wallets/:chain/addresses`
#[derive(Debug, Deserialize)]
pub struct EntryQuery {
    pub address: Option<String>,
    pub network: Option<String>,
}
