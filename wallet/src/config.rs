//! Server configuration from environment variables
//!
//! Controls where the portfolio snapshot is stored, the address the API
//! binds to, allowed CORS origins and the balance endpoints used by the
//! chain adapters.

use portfolio_wallets::EndpointConfig;
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct WalletConfig {
    /// Directory holding the snapshot file
    pub storage_dir: PathBuf,
    /// Address the HTTP API listens on
    pub bind_address: String,
    /// Allowed CORS origins; `None` allows any origin
    pub allowed_origins: Option<Vec<String>>,
    /// Balance endpoints (EVM RPC, Solana RPC, Esplora)
    pub endpoints: EndpointConfig,
}

impl WalletConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `STORAGE_DIR`: snapshot directory (default `./data`)
    /// - `BIND_ADDRESS`: listen address (default `0.0.0.0:3000`)
    /// - `ALLOWED_ORIGINS`: comma separated list of origins (optional)
    /// - endpoint overrides read by [`EndpointConfig::from_env`]
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Local development
    /// BIND_ADDRESS=127.0.0.1:3000 STORAGE_DIR=/tmp/portfolio cargo run -p wallet
    /// ```
    pub fn from_env() -> Self {
        let storage_dir = env::var("STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        log::info!("💾 Snapshot directory: {}", storage_dir.display());

        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|origins| parse_origins(&origins))
            .filter(|origins| !origins.is_empty());

        Self {
            storage_dir,
            bind_address,
            allowed_origins,
            endpoints: EndpointConfig::from_env(),
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("./data"),
            bind_address: "0.0.0.0:3000".to_string(),
            allowed_origins: None,
            endpoints: EndpointConfig::default(),
        }
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WalletConfig::default();
        assert_eq!(config.storage_dir, PathBuf::from("./data"));
        assert_eq!(config.bind_address, "0.0.0.0:3000");
        assert!(config.allowed_origins.is_none());
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example,,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(parse_origins(" , ").is_empty());
    }
}
