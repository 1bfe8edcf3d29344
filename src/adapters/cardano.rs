//! Cardano (CIP-30) adapter
//!
//! The extension hands back raw bytes hex-encoded: the change address as a
//! Shelley address, the balance as a CBOR `Value`. There is no public
//! balance lookup, so only the connected address can be queried.

use ::bitcoin::bech32::{self, Bech32, Hrp};
use async_trait::async_trait;
use ciborium::Value;
use std::sync::{Arc, RwLock};

use super::ChainAdapter;
use crate::chain::ChainKey;
use crate::error::AdapterError;
use crate::providers::{CardanoProvider, CardanoWalletApi};
use crate::units::Amount;

const WALLET: &str = "Eternl";

/// Network id of mainnet in the address header
const MAINNET_ID: u8 = 1;

#[derive(Clone)]
struct CardanoSession {
    address: String,
    api: Arc<dyn CardanoWalletApi>,
}

pub struct CardanoAdapter {
    provider: Option<Arc<dyn CardanoProvider>>,
    session: RwLock<Option<CardanoSession>>,
}

impl CardanoAdapter {
    pub fn new(provider: Option<Arc<dyn CardanoProvider>>) -> Self {
        Self {
            provider,
            session: RwLock::new(None),
        }
    }

    fn session_for(&self, address: &str) -> Option<CardanoSession> {
        self.session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .filter(|s| s.address == address)
            .cloned()
    }
}

#[async_trait]
impl ChainAdapter for CardanoAdapter {
    fn chain(&self) -> ChainKey {
        ChainKey::Ada
    }

    fn wallet_label(&self) -> &'static str {
        WALLET
    }

    fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    async fn connect(&self) -> Result<String, AdapterError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| AdapterError::ProviderUnavailable(WALLET.to_string()))?;

        let api = provider
            .enable()
            .await
            .map_err(|e| AdapterError::from_provider(WALLET, e))?;

        let address_hex = api
            .get_change_address()
            .await
            .map_err(|e| AdapterError::from_provider(WALLET, e))?;
        let address = decode_address(&address_hex).map_err(AdapterError::ConnectionFailed)?;

        log::info!("Connected Eternl change address {}", address);
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = Some(CardanoSession {
            address: address.clone(),
            api,
        });
        Ok(address)
    }

    fn connected_address(&self) -> Option<String> {
        self.session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|s| s.address.clone())
    }

    fn validate_address(&self, address: &str) -> Result<(), AdapterError> {
        let (hrp, data) = bech32::decode(address)
            .map_err(|e| AdapterError::invalid_address(format!("{}: {}", address, e)))?;
        let prefix = hrp.to_lowercase();
        if !matches!(prefix.as_str(), "addr" | "addr_test" | "stake" | "stake_test") || data.is_empty() {
            return Err(AdapterError::invalid_address(format!(
                "{} is not a Cardano address",
                address
            )));
        }
        Ok(())
    }

    async fn fetch_amount(
        &self,
        address: &str,
        _network: Option<&str>,
    ) -> Result<Amount, AdapterError> {
        let session = self
            .session_for(address)
            .ok_or(AdapterError::BalanceUnavailable)?;

        let balance_hex = session
            .api
            .get_balance()
            .await
            .map_err(|e| AdapterError::balance_query_failed(e.to_string()))?;
        let lovelace = decode_coin(&balance_hex).map_err(AdapterError::BalanceQueryFailed)?;

        log::debug!("{}: {} lovelace", address, lovelace);
        Ok(Amount::new(lovelace, ChainKey::Ada.native_decimals()))
    }
}

fn hex_to_bytes(value: &str) -> Result<Vec<u8>, String> {
    let clean = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(clean).map_err(|e| format!("invalid hex: {}", e))
}

/// Raw Shelley address bytes (hex) to bech32
///
/// The header's high nibble is the address type, the low nibble the network
/// id. Byron bootstrap addresses have no bech32 form and are rejected.
pub fn decode_address(address_hex: &str) -> Result<String, String> {
    let bytes = hex_to_bytes(address_hex)?;
    let header = *bytes.first().ok_or("empty address")?;
    let mainnet = header & 0x0f == MAINNET_ID;

    let prefix = match header >> 4 {
        0..=7 if mainnet => "addr",
        0..=7 => "addr_test",
        14 | 15 if mainnet => "stake",
        14 | 15 => "stake_test",
        8 => return Err("Byron addresses are not supported".to_string()),
        other => return Err(format!("unknown address type {}", other)),
    };

    let hrp = Hrp::parse(prefix).map_err(|e| e.to_string())?;
    bech32::encode::<Bech32>(hrp, &bytes).map_err(|e| e.to_string())
}

/// Lovelace from a CBOR `Value`: either `coin` or `[coin, multiasset]`
pub fn decode_coin(balance_hex: &str) -> Result<u128, String> {
    let bytes = hex_to_bytes(balance_hex)?;
    let value: Value =
        ciborium::de::from_reader(bytes.as_slice()).map_err(|e| format!("invalid CBOR: {:?}", e))?;

    let coin = match value {
        Value::Integer(coin) => coin,
        Value::Array(items) => match items.first() {
            Some(Value::Integer(coin)) => *coin,
            _ => return Err("value array does not start with a coin".to_string()),
        },
        _ => return Err("unexpected CBOR value shape".to_string()),
    };

    u128::try_from(i128::from(coin)).map_err(|e| format!("invalid coin amount: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Enterprise address (type 6) with a zero key hash
    fn enterprise_address(network_id: u8) -> String {
        format!("6{}{}", network_id, "00".repeat(28))
    }

    #[test]
    fn test_decode_plain_coin() {
        // uint 2_500_000 -> 0x1a 0x00 0x26 0x25 0xa0
        assert_eq!(decode_coin("1a002625a0").unwrap(), 2_500_000);
    }

    #[test]
    fn test_decode_coin_with_assets() {
        // [1_000_000, {}]
        assert_eq!(decode_coin("821a000f4240a0").unwrap(), 1_000_000);
    }

    #[test]
    fn test_decode_coin_rejects_garbage() {
        assert!(decode_coin("zz").is_err());
        assert!(decode_coin("60").is_err()); // empty text string
    }

    #[test]
    fn test_decode_address_prefix() {
        let address = decode_address(&enterprise_address(1)).unwrap();
        assert!(address.starts_with("addr1"), "got {}", address);

        let testnet = decode_address(&enterprise_address(0)).unwrap();
        assert!(testnet.starts_with("addr_test1"), "got {}", testnet);
    }

    #[test]
    fn test_decode_address_rejects_byron() {
        assert!(decode_address("82d818").is_err());
    }
}
