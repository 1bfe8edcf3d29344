//! Per-chain totals for the portfolio overview

use serde::Serialize;

use crate::chain::ChainKey;
use crate::snapshot::WalletSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainTotal {
    pub chain: ChainKey,
    pub label: &'static str,
    pub symbol: &'static str,
    /// Sum of the chain's stored balances (non-numeric ones ignored)
    pub balance: f64,
    pub wallet_count: usize,
    /// First stored address, shortened for display
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub chains: Vec<ChainTotal>,
}

impl PortfolioSummary {
    pub fn from_snapshot(snapshot: &WalletSnapshot) -> Self {
        let chains = ChainKey::ALL
            .iter()
            .map(|chain| {
                let entries = snapshot.entries(*chain);
                let balance = entries
                    .iter()
                    .filter_map(|e| e.balance.as_deref())
                    .filter_map(|b| b.trim().parse::<f64>().ok())
                    .filter(|v| v.is_finite())
                    .sum::<f64>();

                ChainTotal {
                    chain: *chain,
                    label: chain.display_name(),
                    symbol: chain.symbol(),
                    balance,
                    wallet_count: entries.len(),
                    address: entries
                        .iter()
                        .find_map(|e| e.address.as_deref())
                        .map(short_address),
                }
            })
            .collect();

        Self { chains }
    }

    pub fn chain(&self, chain: ChainKey) -> Option<&ChainTotal> {
        self.chains.iter().find(|t| t.chain == chain)
    }
}

/// `0x1234...abcd` form; addresses of 12 characters or fewer are unchanged
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 12 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::WalletEntry;

    #[test]
    fn test_short_address() {
        assert_eq!(short_address("0x12"), "0x12");
        assert_eq!(short_address("123456789012"), "123456789012");
        assert_eq!(
            short_address("0x742d35Cc6634C0532925a3b844Bc454e4438f44e"),
            "0x742d...f44e"
        );
    }

    #[test]
    fn test_totals_skip_unparseable_balances() {
        let mut snapshot = WalletSnapshot::patch(
            ChainKey::Eth,
            vec![
                WalletEntry::new("0xaaa", "Ethereum").with_balance("1.2500"),
                WalletEntry::new("0xaaa", "Base").with_balance("0.7500"),
                WalletEntry::new("0xbbb", "Polygon").with_balance("n/a"),
            ],
        );
        snapshot.set(ChainKey::Ada, Some(vec![WalletEntry::new("addr1xyz", "Cardano")]));

        let summary = PortfolioSummary::from_snapshot(&snapshot);
        let eth = summary.chain(ChainKey::Eth).unwrap();
        assert_eq!(eth.balance, 2.0);
        assert_eq!(eth.wallet_count, 3);
        assert_eq!(eth.symbol, "ETH");

        let ada = summary.chain(ChainKey::Ada).unwrap();
        assert_eq!(ada.balance, 0.0);
        assert_eq!(ada.wallet_count, 1);

        let sol = summary.chain(ChainKey::Sol).unwrap();
        assert_eq!(sol.wallet_count, 0);
        assert!(sol.address.is_none());
    }
}
