//! Portfolio Manager - Action Boundary
//!
//! Runs the per-chain actions (connect, refresh, add, remove) against the
//! chain adapters and the snapshot store, and keeps the state each chain
//! card displays. Adapter errors end here as card messages.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use portfolio_wallets::{
    find, remove, short_address, upsert, AdapterError, ChainAdapters, ChainKey,
    EvmNetwork, PortfolioSummary, ProviderAvailability, Providers, SnapshotStore, WalletEntry,
    WalletSnapshot,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::config::WalletConfig;

/// Shown when an add action is submitted without an address
pub const ENTER_ADDRESS: &str = "Enter an address.";

/// Mutable part of a chain card
#[derive(Debug, Clone, Default)]
struct CardStatus {
    /// Sequence number of the latest action started on this chain
    seq: u64,
    loading: bool,
    error: Option<String>,
    add_error: Option<String>,
    notice: Option<String>,
    balance: Option<String>,
    last_updated: Option<DateTime<Utc>>,
}

/// Everything a chain card displays
#[derive(Debug, Clone, Serialize)]
pub struct CardState {
    pub chain: ChainKey,
    pub label: &'static str,
    pub symbol: &'static str,
    /// Wallet extension used by connect
    pub wallet: &'static str,
    /// Provider present in this runtime
    pub provider_available: bool,
    /// Provider present, or the chain already tracks wallets
    pub available: bool,
    pub loading: bool,
    /// Error of the last connect / refresh action
    pub error: Option<String>,
    /// Error of the last add-address action
    pub add_error: Option<String>,
    pub notice: Option<String>,
    pub connected_address: Option<String>,
    /// Balance of the connected address
    pub balance: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub entries: Vec<WalletEntry>,
}

pub struct PortfolioManager {
    adapters: ChainAdapters,
    store: SnapshotStore,
    cards: Mutex<HashMap<ChainKey, CardStatus>>,
}

impl PortfolioManager {
    // ============================================================================
    // Constructor
    // ============================================================================

    /// Manager for a runtime without wallet extensions, persisting to disk
    pub fn new(config: &WalletConfig) -> Self {
        let adapters = ChainAdapters::new(Providers::default(), &config.endpoints);
        let store = SnapshotStore::on_disk(config.storage_dir.clone());
        Self::with_parts(adapters, store)
    }

    /// Create PortfolioManager with custom adapters and store (for testing)
    pub fn with_parts(adapters: ChainAdapters, store: SnapshotStore) -> Self {
        Self {
            adapters,
            store,
            cards: Mutex::new(HashMap::new()),
        }
    }

    // ============================================================================
    // Read-only views
    // ============================================================================

    pub fn availability(&self) -> ProviderAvailability {
        self.adapters.availability()
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        self.store.load()
    }

    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::from_snapshot(&self.store.load())
    }

    pub fn card(&self, chain: ChainKey) -> CardState {
        let status = self.lock_cards().entry(chain).or_default().clone();
        let snapshot = self.store.load();
        let entries = snapshot.entries(chain).to_vec();
        let adapter = self.adapters.get(chain);
        let provider_available = adapter.is_available();

        CardState {
            chain,
            label: chain.display_name(),
            symbol: chain.symbol(),
            wallet: adapter.wallet_label(),
            provider_available,
            available: provider_available || !entries.is_empty(),
            loading: status.loading,
            error: status.error,
            add_error: status.add_error,
            notice: status.notice,
            connected_address: adapter.connected_address(),
            balance: status.balance,
            last_updated: status.last_updated,
            entries,
        }
    }

    // ============================================================================
    // Actions
    // ============================================================================

    /// Connect the chain's wallet, fetch its balance and store the entry
    pub async fn connect(&self, chain: ChainKey) -> CardState {
        let seq = self.begin(chain);
        let adapter = self.adapters.get(chain);

        let result = match adapter.connect().await {
            Ok(address) => {
                log::info!("{} connected: {}", chain.display_name(), address);
                self.query_and_store(
                    chain,
                    &address,
                    Some(chain.default_network()),
                    Some(adapter.wallet_label()),
                )
                .await
            }
            Err(e) => Err(e),
        };

        self.finish_balance_action(chain, seq, result);
        self.card(chain)
    }

    /// Re-query the connected address; no-op without a session
    pub async fn refresh(&self, chain: ChainKey) -> CardState {
        let adapter = self.adapters.get(chain);
        let Some(address) = adapter.connected_address() else {
            log::debug!("{} refresh skipped: not connected", chain.display_name());
            return self.card(chain);
        };

        let seq = self.begin(chain);
        let result = self
            .query_and_store(
                chain,
                &address,
                Some(chain.default_network()),
                Some(adapter.wallet_label()),
            )
            .await;

        self.finish_balance_action(chain, seq, result);
        self.card(chain)
    }

    /// Re-query every stored entry of the chain concurrently
    ///
    /// Entries without a balance source (manually added Cardano addresses)
    /// are left untouched.
    pub async fn refresh_all(&self, chain: ChainKey) -> CardState {
        let seq = self.begin(chain);
        let adapter = self.adapters.get(chain);

        // Entries keep their stored network, including none for legacy ones
        let targets: Vec<(String, Option<String>)> = self
            .store
            .load()
            .entries(chain)
            .iter()
            .filter_map(|entry| Some((entry.address.clone()?, entry.network.clone())))
            .collect();

        let results = join_all(targets.iter().map(|(address, network)| {
            let network = network.as_deref().unwrap_or(chain.default_network());
            adapter.get_balance(address, Some(network))
        }))
        .await;

        let mut list = self.store.load().entries(chain).to_vec();
        let mut failures = Vec::new();
        for ((address, network), result) in targets.iter().zip(results) {
            match result {
                Ok(balance) => {
                    let key = chain.wallet_key(address, network.as_deref());
                    let update = WalletEntry {
                        address: Some(address.clone()),
                        balance: Some(balance),
                        ..Default::default()
                    };
                    list = upsert(&list, update, &key);
                }
                Err(AdapterError::BalanceUnavailable) => {
                    log::debug!("{}: no balance source, skipped", address);
                }
                Err(e) => {
                    log::warn!("{} refresh of {} failed: {}", chain.display_name(), address, e);
                    failures.push(format!("{}: {}", short_address(address), e));
                }
            }
        }
        self.store.update(&WalletSnapshot::patch(chain, list));

        self.finish(chain, seq, |status| {
            status.error = (!failures.is_empty()).then(|| failures.join("; "));
            status.last_updated = Some(Utc::now());
        });
        self.card(chain)
    }

    /// Track an address without connecting a wallet
    ///
    /// EVM addresses are tracked per network (`Ethereum` when none given).
    /// An address with no balance source is still stored, with a notice.
    pub async fn add_address(
        &self,
        chain: ChainKey,
        address: &str,
        network: Option<&str>,
    ) -> CardState {
        let address = address.trim();
        if address.is_empty() {
            self.lock_cards().entry(chain).or_default().add_error = Some(ENTER_ADDRESS.to_string());
            return self.card(chain);
        }

        let seq = self.begin(chain);
        let adapter = self.adapters.get(chain);

        let checked = resolve_network(chain, network)
            .and_then(|network| adapter.validate_address(address).map(|_| network));
        let network = match checked {
            Ok(network) => network,
            Err(e) => {
                self.finish(chain, seq, |status| status.add_error = Some(e.to_string()));
                return self.card(chain);
            }
        };

        match adapter.get_balance(address, Some(network.as_str())).await {
            Ok(balance) => {
                log::info!("{} added {} ({})", chain.display_name(), short_address(address), balance);
                self.store_entry(chain, WalletEntry::new(address, network.as_str()).with_balance(balance));
                self.finish(chain, seq, |_| {});
            }
            Err(AdapterError::BalanceUnavailable) => {
                self.store_entry(chain, WalletEntry::new(address, network.as_str()));
                self.finish(chain, seq, |status| {
                    status.notice = Some(AdapterError::BalanceUnavailable.to_string())
                });
            }
            Err(e) => {
                log::warn!("{} add of {} failed: {}", chain.display_name(), address, e);
                self.finish(chain, seq, |status| status.add_error = Some(e.to_string()));
            }
        }
        self.card(chain)
    }

    /// Re-query one stored entry on its stored network
    pub async fn refresh_entry(
        &self,
        chain: ChainKey,
        address: &str,
        network: Option<&str>,
    ) -> CardState {
        let seq = self.begin(chain);
        let key = chain.wallet_key(address, network);

        let snapshot = self.store.load();
        let Some(stored) = find(snapshot.entries(chain), &key) else {
            self.finish(chain, seq, |status| {
                status.error = Some(format!("No stored wallet {}", short_address(address)))
            });
            return self.card(chain);
        };
        let network = stored.network.clone();

        let result = self
            .query_and_store(chain, address, network.as_deref(), None)
            .await;
        self.finish(chain, seq, |status| {
            status.error = result.err().map(|e| e.to_string());
        });
        self.card(chain)
    }

    /// Stop tracking one entry
    pub fn remove_entry(&self, chain: ChainKey, address: &str, network: Option<&str>) -> CardState {
        let key = chain.wallet_key(address, network);
        let list = remove(self.store.load().entries(chain), &key);
        self.store.update(&WalletSnapshot::patch(chain, list));
        log::info!("{} removed {}", chain.display_name(), short_address(address));
        self.card(chain)
    }

    // ============================================================================
    // Helpers
    // ============================================================================

    fn lock_cards(&self) -> MutexGuard<'_, HashMap<ChainKey, CardStatus>> {
        self.cards.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start an action: bump the sequence, set loading, clear messages
    fn begin(&self, chain: ChainKey) -> u64 {
        let mut cards = self.lock_cards();
        let status = cards.entry(chain).or_default();
        status.seq += 1;
        status.loading = true;
        status.error = None;
        status.add_error = None;
        status.notice = None;
        status.seq
    }

    /// Apply an action's outcome unless a newer action has started since
    fn finish(&self, chain: ChainKey, seq: u64, apply: impl FnOnce(&mut CardStatus)) -> bool {
        let mut cards = self.lock_cards();
        let status = cards.entry(chain).or_default();
        if status.seq != seq {
            log::debug!(
                "{} result of action {} is stale (latest {})",
                chain.display_name(),
                seq,
                status.seq
            );
            return false;
        }
        status.loading = false;
        apply(status);
        true
    }

    fn finish_balance_action(&self, chain: ChainKey, seq: u64, result: Result<String, AdapterError>) {
        self.finish(chain, seq, |status| match result {
            Ok(balance) => {
                status.balance = Some(balance);
                status.last_updated = Some(Utc::now());
            }
            Err(e) => {
                log::warn!("{} action failed: {}", chain.display_name(), e);
                status.error = Some(e.to_string());
            }
        });
    }

    /// Query a balance and upsert it into the chain's stored list
    ///
    /// The list is read fresh from the store right before the write. An
    /// entry without a network is queried on the chain's default one and
    /// stays untagged.
    async fn query_and_store(
        &self,
        chain: ChainKey,
        address: &str,
        network: Option<&str>,
        label: Option<&str>,
    ) -> Result<String, AdapterError> {
        let query_network = network.unwrap_or(chain.default_network());
        let balance = self
            .adapters
            .get(chain)
            .get_balance(address, Some(query_network))
            .await?;

        let mut entry = WalletEntry {
            address: Some(address.to_string()),
            network: network.map(str::to_string),
            ..Default::default()
        }
        .with_balance(balance.clone());
        if let Some(label) = label {
            entry = entry.with_label(label);
        }
        self.store_entry(chain, entry);
        Ok(balance)
    }

    fn store_entry(&self, chain: ChainKey, entry: WalletEntry) {
        let address = entry.address.clone().unwrap_or_default();
        let key = chain.wallet_key(&address, entry.network.as_deref());
        let list = upsert(self.store.load().entries(chain), entry, &key);
        self.store.update(&WalletSnapshot::patch(chain, list));
    }
}

/// Network tag stored with a manually added entry
fn resolve_network(chain: ChainKey, network: Option<&str>) -> Result<String, AdapterError> {
    match chain {
        ChainKey::Eth => {
            let network = match network.map(str::trim).filter(|n| !n.is_empty()) {
                Some(name) => name.parse::<EvmNetwork>()?,
                None => EvmNetwork::default(),
            };
            Ok(network.to_string())
        }
        _ => Ok(chain.default_network().to_string()),
    }
}
