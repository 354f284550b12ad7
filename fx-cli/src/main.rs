//! FX CLI
//!
//! Command-line interface for the FX buyer API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use fx_client::{FxClient, PurchaseOutcome};
use fx_types::{CurrencyCode, MoneyAmount};

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "FX buyer API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the FX buyer API
    #[arg(long, env = "FX_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the exchange rate between two currencies
    Rate {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Read the cash balance
    Balance,
    /// Self-issue cash
    Issue {
        /// Quantity to issue, e.g. 100.00
        quantity: Decimal,
        #[arg(long, default_value = "USD")]
        currency: String,
    },
    /// Buy a money amount
    Buy {
        /// Quantity to buy, e.g. 50
        quantity: Decimal,
        /// Currency to buy
        #[arg(long)]
        currency: String,
        /// Currency to pay with
        #[arg(long, default_value = "USD")]
        pay_with: String,
    },
    /// Check API health
    Health,
}

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    Ok(CurrencyCode::parse(s)?)
}

fn parse_amount(quantity: Decimal, currency: &str) -> Result<MoneyAmount> {
    Ok(MoneyAmount::new(quantity, parse_currency(currency)?)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = FxClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Rate { from, to } => {
            let rate = client
                .exchange_rate(parse_currency(&from)?, parse_currency(&to)?)
                .await?;
            println!("{}", serde_json::to_string_pretty(&rate)?);
        }

        Commands::Balance => {
            let balance = client.cash_balance().await?;
            println!("{}", balance);
        }

        Commands::Issue { quantity, currency } => {
            let amount = parse_amount(quantity, &currency)?;
            client.issue_cash(amount).await?;
            println!("✓ Issued {}", amount);
        }

        Commands::Buy {
            quantity,
            currency,
            pay_with,
        } => {
            let amount = parse_amount(quantity, &currency)?;
            match client.buy(amount, parse_currency(&pay_with)?).await? {
                PurchaseOutcome::Completed => println!("✓ Bought {}", amount),
                PurchaseOutcome::Insufficient { message, .. } => {
                    println!("✗ {}", message);
                    std::process::exit(2);
                }
            }
        }
    }

    Ok(())
}
