use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use crate::config::WalletConfig;
use crate::manager::PortfolioManager;

/// CORS from `ALLOWED_ORIGINS`; any origin when unset (development mode)
pub fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    match allowed_origins {
        Some(origins) if !origins.is_empty() => {
            log::info!("CORS configured for origins: {}", origins.join(","));
            let origin_list: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        log::warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origin_list)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        _ => {
            log::warn!("CORS: Allowing all origins (development mode). Set ALLOWED_ORIGINS env var for production.");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

pub fn build_router(manager: Arc<PortfolioManager>, cors: CorsLayer) -> Router {
    Router::new()
        // Portfolio-wide views
        .route("/api/wallets", get(handlers::get_snapshot_handler))
        .route(
            "/api/wallets/availability",
            get(handlers::get_availability_handler),
        )
        .route("/api/wallets/summary", get(handlers::get_summary_handler))
        // Chain card actions
        .route("/api/wallets/:chain", get(handlers::get_card_handler))
        .route(
            "/api/wallets/:chain/connect",
            post(handlers::connect_handler),
        )
        .route(
            "/api/wallets/:chain/refresh",
            post(handlers::refresh_handler),
        )
        .route(
            "/api/wallets/:chain/refresh-all",
            post(handlers::refresh_all_handler),
        )
        .route(
            "/api/wallets/:chain/addresses",
            post(handlers::add_address_handler).delete(handlers::remove_entry_handler),
        )
        .route(
            "/api/wallets/:chain/addresses/refresh",
            post(handlers::refresh_entry_handler),
        )
        .layer(cors)
        .with_state(manager)
}

pub async fn start_server(config: WalletConfig) -> anyhow::Result<()> {
    let manager = Arc::new(PortfolioManager::new(&config));
    let cors = cors_layer(config.allowed_origins.as_deref());
    let app = build_router(manager, cors);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    log::info!("Server listening on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            log::info!("Received SIGTERM signal");
        },
    }

    log::info!("Shutdown signal received, exiting gracefully...");
}
