//! Aggregation Tests
//!
//! Identity-keyed upsert and remove over per-chain wallet lists.
//!
//! Run with: cargo test --test aggregate_test

use portfolio_wallets::{find, remove, upsert, ChainKey, WalletEntry};

fn eth_list() -> Vec<WalletEntry> {
    vec![
        WalletEntry::new("0xaaa", "Ethereum")
            .with_balance("1.0000")
            .with_label("MetaMask"),
        WalletEntry::new("0xaaa", "Arbitrum").with_balance("0.2500"),
        WalletEntry::new("0xbbb", "Ethereum").with_balance("3.0000"),
    ]
}

// ============================================================================
// upsert
// ============================================================================

#[test]
fn test_upsert_matching_key_replaces_in_place() {
    let list = eth_list();
    let key = ChainKey::Eth.wallet_key("0xaaa", Some("Arbitrum"));

    let next = upsert(
        &list,
        WalletEntry::new("0xaaa", "Arbitrum").with_balance("0.5000"),
        &key,
    );

    assert_eq!(next.len(), list.len(), "length must be preserved");
    assert_eq!(next[1].balance.as_deref(), Some("0.5000"));
    assert_eq!(next[0], list[0], "other networks untouched");
    assert_eq!(list[1].balance.as_deref(), Some("0.2500"), "input not mutated");
}

#[test]
fn test_upsert_preserves_fields_missing_from_new_entry() {
    let list = eth_list();
    let key = ChainKey::Eth.wallet_key("0xaaa", Some("Ethereum"));
    let refreshed = WalletEntry {
        address: Some("0xaaa".to_string()),
        balance: Some("1.2345".to_string()),
        network: Some("Ethereum".to_string()),
        label: None,
    };

    let next = upsert(&list, refreshed, &key);

    assert_eq!(next[0].label.as_deref(), Some("MetaMask"));
    assert_eq!(next[0].balance.as_deref(), Some("1.2345"));
}

#[test]
fn test_upsert_new_network_appends() {
    let list = eth_list();
    let key = ChainKey::Eth.wallet_key("0xbbb", Some("Base"));

    let next = upsert(&list, WalletEntry::new("0xbbb", "Base").with_balance("0.0100"), &key);

    assert_eq!(next.len(), list.len() + 1);
    assert_eq!(next.last().unwrap().network.as_deref(), Some("Base"));
}

#[test]
fn test_upsert_address_keyed_chain_ignores_network() {
    let list = vec![WalletEntry::new("So1ana", "Solana").with_balance("2.0000")];
    let key = ChainKey::Sol.wallet_key("So1ana", None);

    let next = upsert(&list, WalletEntry::new("So1ana", "Solana").with_balance("2.5000"), &key);

    assert_eq!(next.len(), 1);
    assert_eq!(next[0].balance.as_deref(), Some("2.5000"));
}

#[test]
fn test_upsert_into_empty_list() {
    let key = ChainKey::Btc.wallet_key("bc1qxyz", None);
    let next = upsert(&[], WalletEntry::new("bc1qxyz", "Bitcoin"), &key);
    assert_eq!(next.len(), 1);
}

#[test]
fn test_repeated_upsert_never_duplicates() {
    let key = ChainKey::Ada.wallet_key("addr1xyz", None);
    let mut list = Vec::new();
    for balance in ["1.000000", "2.000000", "3.000000"] {
        list = upsert(
            &list,
            WalletEntry::new("addr1xyz", "Cardano").with_balance(balance),
            &key,
        );
    }
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].balance.as_deref(), Some("3.000000"));
}

// ============================================================================
// remove
// ============================================================================

#[test]
fn test_remove_drops_only_matching_network() {
    let list = eth_list();
    let key = ChainKey::Eth.wallet_key("0xaaa", Some("Ethereum"));

    let next = remove(&list, &key);

    assert_eq!(next.len(), list.len() - 1);
    assert!(find(&next, &key).is_none());
    assert!(find(&next, &ChainKey::Eth.wallet_key("0xaaa", Some("Arbitrum"))).is_some());
}

#[test]
fn test_remove_drops_every_match() {
    // Lists written by older versions may hold duplicates
    let list = vec![
        WalletEntry::new("bc1qdup", "Bitcoin"),
        WalletEntry::new("bc1qother", "Bitcoin"),
        WalletEntry::new("bc1qdup", "Bitcoin"),
    ];
    let next = remove(&list, &ChainKey::Btc.wallet_key("bc1qdup", None));
    assert_eq!(next.len(), 1);
}

#[test]
fn test_remove_without_match_is_noop() {
    let list = eth_list();
    let next = remove(&list, &ChainKey::Eth.wallet_key("0xccc", Some("Ethereum")));
    assert_eq!(next, list);
}
