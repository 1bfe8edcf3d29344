//! Portfolio wallet server
//!
//! - `manager` - per-chain actions and card state
//! - `api` - JSON HTTP binding of the manager
//! - `config` - environment configuration

pub mod api;
pub mod config;
pub mod error;
pub mod manager;

pub use manager::{CardState, PortfolioManager};
