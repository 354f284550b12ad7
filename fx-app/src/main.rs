//! # FX Buyer Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize logging and telemetry
//! - Build the in-memory FX desk
//! - Create the buyer service
//! - Start the HTTP server

mod config;
mod telemetry;

use fx_desk::{InMemoryFxDesk, RateTable};
use fx_hex::{BuyerService, inbound::HttpServer};
use fx_types::{FxService, MoneyAmount};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize tracing subscriber and OpenTelemetry export
    let telemetry = telemetry::init(&config)?;

    tracing::info!("Starting FX buyer server on port {}", config.port);
    tracing::info!("Reporting balance in {}", config.base_currency);

    let desk = InMemoryFxDesk::new(RateTable::default(), config.base_currency);
    if let Some(quantity) = config.opening_balance {
        let opening = MoneyAmount::new(quantity, config.base_currency)?;
        desk.self_issue_cash(opening).await?;
        tracing::info!(%opening, "Issued opening balance");
    }

    // Create the buyer service
    let service = BuyerService::new(desk);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces and metrics are flushed before exit
    telemetry.shutdown();
    Ok(())
}
