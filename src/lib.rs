//! Portfolio Wallets: read-only multi-chain wallet aggregation
//!
//! Fetches addresses and balances from wallet providers or public chain
//! APIs, merges them into per-chain wallet lists and persists the whole
//! portfolio snapshot.
//!
//! # Architecture
//!
//! - **Chain Adapters**: EVM, Solana, Bitcoin and Cardano behind one
//!   `ChainAdapter` contract
//! - **Aggregation**: identity-keyed `upsert` / `remove` over wallet lists
//! - **Snapshot Store**: load / update / save over an injected storage backend
//!
//! # Example
//!
//! ```ignore
//! use portfolio_wallets::{
//!     upsert, ChainAdapters, ChainKey, EndpointConfig, Providers, SnapshotStore, WalletEntry,
//!     WalletSnapshot,
//! };
//!
//! let adapters = ChainAdapters::new(Providers::default(), &EndpointConfig::from_env());
//! let store = SnapshotStore::in_memory();
//!
//! let btc = adapters.get(ChainKey::Btc);
//! let balance = btc.get_balance("bc1q...", None).await?;
//!
//! let key = ChainKey::Btc.wallet_key("bc1q...", None);
//! let entry = WalletEntry::new("bc1q...", "Bitcoin").with_balance(balance);
//! let list = upsert(store.load().entries(ChainKey::Btc), entry, &key);
//! store.update(&WalletSnapshot::patch(ChainKey::Btc, list));
//! ```

// Public modules
pub mod adapters;
pub mod aggregate;
pub mod chain;
pub mod config;
pub mod entry;
pub mod error;
pub mod esplora;
pub mod providers;
pub mod rpc;
pub mod snapshot;
pub mod store;
pub mod summary;
pub mod units;

// Re-exports for convenience
pub use adapters::{ChainAdapter, ChainAdapters, ProviderAvailability, Providers};
pub use aggregate::{find, remove, upsert};
pub use chain::{ChainKey, EvmNetwork};
pub use config::EndpointConfig;
pub use entry::{WalletEntry, WalletKey};
pub use error::{AdapterError, ProviderError, StorageError};
pub use snapshot::WalletSnapshot;
pub use store::{FileStorage, MemoryStorage, SnapshotStore, StorageBackend, STORAGE_KEY};
pub use summary::{short_address, PortfolioSummary};
pub use units::Amount;
