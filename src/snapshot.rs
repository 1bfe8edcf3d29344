//! Persisted portfolio snapshot and payload normalization

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chain::ChainKey;
use crate::entry::WalletEntry;

/// Schema version written with every saved payload
///
/// Payloads without a `version` field predate it and are read as legacy.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Wallet lists per chain
///
/// Also used as a patch: a present chain list replaces the stored one, an
/// absent chain is left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth: Option<Vec<WalletEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sol: Option<Vec<WalletEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub btc: Option<Vec<WalletEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ada: Option<Vec<WalletEntry>>,
}

impl WalletSnapshot {
    /// Patch replacing a single chain's list
    pub fn patch(chain: ChainKey, list: Vec<WalletEntry>) -> Self {
        let mut snapshot = Self::default();
        snapshot.set(chain, Some(list));
        snapshot
    }

    pub fn get(&self, chain: ChainKey) -> Option<&Vec<WalletEntry>> {
        self.slot(chain).as_ref()
    }

    /// Entries of `chain`, empty when the key is absent
    pub fn entries(&self, chain: ChainKey) -> &[WalletEntry] {
        self.get(chain).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set(&mut self, chain: ChainKey, list: Option<Vec<WalletEntry>>) {
        *self.slot_mut(chain) = list;
    }

    pub fn is_empty(&self) -> bool {
        ChainKey::ALL.iter().all(|chain| self.get(*chain).is_none())
    }

    /// Replace every chain list present in `patch`
    pub fn apply(&mut self, patch: &WalletSnapshot) {
        for chain in ChainKey::ALL {
            if let Some(list) = patch.get(chain) {
                self.set(chain, Some(list.clone()));
            }
        }
    }

    fn slot(&self, chain: ChainKey) -> &Option<Vec<WalletEntry>> {
        match chain {
            ChainKey::Eth => &self.eth,
            ChainKey::Sol => &self.sol,
            ChainKey::Btc => &self.btc,
            ChainKey::Ada => &self.ada,
        }
    }

    fn slot_mut(&mut self, chain: ChainKey) -> &mut Option<Vec<WalletEntry>> {
        match chain {
            ChainKey::Eth => &mut self.eth,
            ChainKey::Sol => &mut self.sol,
            ChainKey::Btc => &mut self.btc,
            ChainKey::Ada => &mut self.ada,
        }
    }

    /// Build a snapshot from any JSON value, tolerating older shapes
    ///
    /// - a chain value that is a single object becomes a one-element list
    /// - a chain value that is neither object nor array is treated as absent
    /// - list elements that are not entry objects are dropped
    /// - a non-object payload yields an empty snapshot
    pub fn from_value(value: &Value) -> Self {
        let Some(raw) = value.as_object() else {
            return Self::default();
        };

        let mut snapshot = Self::default();
        for chain in ChainKey::ALL {
            let list = raw.get(chain.as_str()).and_then(|v| normalize_entries(chain, v));
            snapshot.set(chain, list);
        }
        snapshot
    }

    /// Serialized payload including the schema version
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            map.insert("version".to_string(), Value::from(SNAPSHOT_VERSION));
        }
        serde_json::to_string(&value)
    }
}

fn normalize_entries(chain: ChainKey, value: &Value) -> Option<Vec<WalletEntry>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match serde_json::from_value::<WalletEntry>(item.clone()) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        log::warn!("Dropping malformed {} wallet entry: {}", chain, e);
                        None
                    }
                })
                .collect(),
        ),
        Value::Object(_) => {
            log::debug!("Normalizing legacy single-object {} snapshot", chain);
            match serde_json::from_value::<WalletEntry>(value.clone()) {
                Ok(entry) => Some(vec![entry]),
                Err(e) => {
                    log::warn!("Dropping malformed {} wallet entry: {}", chain, e);
                    None
                }
            }
        }
        _ => None,
    }
}
