use wallet::api::server;
use wallet::config::WalletConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok(); // Load .env file if present

    // Initialize logger (set RUST_LOG=debug for verbose output, RUST_LOG=info for normal)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // BIND_ADDRESS=127.0.0.1:3000 for local development
    let config = WalletConfig::from_env();

    log::info!("Starting portfolio wallet server on {}", config.bind_address);
    server::start_server(config).await?;
    Ok(())
}
