//! Client example demonstrating the buyer flow against a running server.
//!
//! Run with: cargo run -p fx-app --example client_example

use std::net::SocketAddr;

use fx_client::{FxClient, PurchaseOutcome};
use fx_desk::{InMemoryFxDesk, RateTable};
use fx_hex::{BuyerService, inbound::HttpServer};
use fx_types::{CurrencyCode, MoneyAmount};
use rust_decimal::Decimal;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Bind to an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    println!("🚀 Starting server on {addr}...");

    // Start server in background
    let desk = InMemoryFxDesk::new(RateTable::default(), CurrencyCode::USD);
    let router = HttpServer::new(BuyerService::new(desk)).router();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    let client = FxClient::new(format!("http://{addr}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: buyer flow
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    let rate = client
        .exchange_rate(CurrencyCode::EUR, CurrencyCode::USD)
        .await?;
    println!("✅ 1 {} = {} {}", rate.from, rate.rate, rate.to);

    // Nothing issued yet, so this purchase comes up short
    let fifty_eur = MoneyAmount::new(Decimal::new(50, 0), CurrencyCode::EUR)?;
    match client.buy(fifty_eur, CurrencyCode::USD).await? {
        PurchaseOutcome::Completed => println!("⚠️  Unexpectedly bought {fifty_eur}"),
        PurchaseOutcome::Insufficient { missing, .. } => {
            println!("✅ Purchase refused, missing {missing}")
        }
    }

    let hundred_usd = MoneyAmount::new(Decimal::new(100, 0), CurrencyCode::USD)?;
    client.issue_cash(hundred_usd).await?;
    println!("✅ Issued {hundred_usd}");
    println!("   Balance: {}", client.cash_balance().await?);

    match client.buy(fifty_eur, CurrencyCode::USD).await? {
        PurchaseOutcome::Completed => println!("✅ Bought {fifty_eur}"),
        PurchaseOutcome::Insufficient { message, .. } => println!("⚠️  {message}"),
    }
    println!("   Balance: {}", client.cash_balance().await?);

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
