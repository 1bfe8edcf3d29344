//! Identity-based merge of fetched balances into a chain's wallet list
//!
//! Both operations return a new list and leave the input untouched, so a
//! caller can compare old and new before persisting.

use crate::entry::{WalletEntry, WalletKey};

/// Insert or update the entry identified by `key`
///
/// The first matching element is shallow-merged in place; when nothing
/// matches the entry is appended.
pub fn upsert(list: &[WalletEntry], entry: WalletEntry, key: &WalletKey) -> Vec<WalletEntry> {
    let mut next = list.to_vec();
    match next.iter().position(|item| key.matches(item)) {
        Some(index) => {
            log::debug!("Updating wallet entry {} at position {}", key.address(), index);
            next[index] = next[index].merged_with(&entry);
        }
        None => {
            log::debug!("Appending wallet entry {}", key.address());
            next.push(entry);
        }
    }
    next
}

/// Drop every element identified by `key`
pub fn remove(list: &[WalletEntry], key: &WalletKey) -> Vec<WalletEntry> {
    list.iter().filter(|item| !key.matches(item)).cloned().collect()
}

/// First element identified by `key`
pub fn find<'a>(list: &'a [WalletEntry], key: &WalletKey) -> Option<&'a WalletEntry> {
    list.iter().find(|item| key.matches(item))
}
