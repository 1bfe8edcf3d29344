use axum::{
    extract::{Path, Query, State},
    Json,
};
use portfolio_wallets::{ChainKey, PortfolioSummary, ProviderAvailability, WalletSnapshot};
use std::sync::Arc;

use super::types::{AddAddressRequest, EntryQuery, RefreshEntryRequest};
use crate::error::WalletError;
use crate::manager::{CardState, PortfolioManager};

fn parse_chain(chain: &str) -> Result<ChainKey, WalletError> {
    chain
        .parse::<ChainKey>()
        .map_err(|_| WalletError::UnknownChain(chain.to_string()))
}

fn require_address(address: Option<&str>) -> Result<&str, WalletError> {
    address
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| WalletError::InvalidInput("address is required".to_string()))
}

pub async fn get_snapshot_handler(
    State(manager): State<Arc<PortfolioManager>>,
) -> Json<WalletSnapshot> {
    Json(manager.snapshot())
}

pub async fn get_availability_handler(
    State(manager): State<Arc<PortfolioManager>>,
) -> Json<ProviderAvailability> {
    Json(manager.availability())
}

pub async fn get_summary_handler(
    State(manager): State<Arc<PortfolioManager>>,
) -> Json<PortfolioSummary> {
    Json(manager.summary())
}

pub async fn get_card_handler(
    State(manager): State<Arc<PortfolioManager>>,
    Path(chain): Path<String>,
) -> Result<Json<CardState>, WalletError> {
    let chain = parse_chain(&chain)?;
    Ok(Json(manager.card(chain)))
}

pub async fn connect_handler(
    State(manager): State<Arc<PortfolioManager>>,
    Path(chain): Path<String>,
) -> Result<Json<CardState>, WalletError> {
    let chain = parse_chain(&chain)?;
    Ok(Json(manager.connect(chain).await))
}

pub async fn refresh_handler(
    State(manager): State<Arc<PortfolioManager>>,
    Path(chain): Path<String>,
) -> Result<Json<CardState>, WalletError> {
    let chain = parse_chain(&chain)?;
    Ok(Json(manager.refresh(chain).await))
}

pub async fn refresh_all_handler(
    State(manager): State<Arc<PortfolioManager>>,
    Path(chain): Path<String>,
) -> Result<Json<CardState>, WalletError> {
    let chain = parse_chain(&chain)?;
    Ok(Json(manager.refresh_all(chain).await))
}

pub async fn add_address_handler(
    State(manager): State<Arc<PortfolioManager>>,
    Path(chain): Path<String>,
    Json(req): Json<AddAddressRequest>,
) -> Result<Json<CardState>, WalletError> {
    let chain = parse_chain(&chain)?;
    let card = manager
        .add_address(chain, &req.address, req.network.as_deref())
        .await;
    Ok(Json(card))
}

pub async fn refresh_entry_handler(
    State(manager): State<Arc<PortfolioManager>>,
    Path(chain): Path<String>,
    Json(req): Json<RefreshEntryRequest>,
) -> Result<Json<CardState>, WalletError> {
    let chain = parse_chain(&chain)?;
    let address = require_address(Some(req.address.as_str()))?;
    let card = manager
        .refresh_entry(chain, address, req.network.as_deref())
        .await;
    Ok(Json(card))
}

pub async fn remove_entry_handler(
    State(manager): State<Arc<PortfolioManager>>,
    Path(chain): Path<String>,
    Query(query): Query<EntryQuery>,
) -> Result<Json<CardState>, WalletError> {
    let chain = parse_chain(&chain)?;
    let address = require_address(query.address.as_deref())?;
    Ok(Json(manager.remove_entry(chain, address, query.network.as_deref())))
}
