//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use fx_types::domain::{CurrencyCode, MoneyAmount};
use fx_types::dto::{
    ExchangeRateQuery, ExchangeRateResponse, InsufficientFundsResponse, IssueCashRequest,
    MessageResponse, PurchaseRequest,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Read the exchange rate between two currencies
#[utoipa::path(
    get,
    path = "/api/exchangeRate",
    tag = "rates",
    params(ExchangeRateQuery),
    responses(
        (status = 200, description = "Exchange rate", body = ExchangeRateResponse),
        (status = 400, description = "Missing or malformed currency code", body = MessageResponse),
        (status = 404, description = "No exchange rate found", body = MessageResponse),
        (status = 500, description = "Unknown error", body = MessageResponse)
    )
)]
async fn read_exchange_rate() {}

/// Read the cash balance
#[utoipa::path(
    get,
    path = "/api/cash",
    tag = "cash",
    responses(
        (status = 200, description = "Current balance", body = MoneyAmount),
        (status = 500, description = "Unknown error", body = MessageResponse)
    )
)]
async fn read_cash_balance() {}

/// Self-issue cash
#[utoipa::path(
    post,
    path = "/api/cash",
    tag = "cash",
    request_body = IssueCashRequest,
    responses(
        (status = 201, description = "Cash issued"),
        (status = 400, description = "Missing body or invalid amount", body = MessageResponse),
        (status = 415, description = "Body is not JSON", body = MessageResponse),
        (status = 500, description = "Unknown error", body = MessageResponse)
    )
)]
async fn self_issue_cash() {}

/// Buy a money amount, paying in another currency
#[utoipa::path(
    post,
    path = "/api/purchases",
    tag = "purchases",
    request_body = PurchaseRequest,
    responses(
        (status = 201, description = "Purchase completed"),
        (status = 400, description = "Missing body or invalid input", body = MessageResponse),
        (status = 415, description = "Body is not JSON", body = MessageResponse),
        (status = 422, description = "Insufficient funds", body = InsufficientFundsResponse),
        (status = 500, description = "Unknown error", body = MessageResponse)
    )
)]
async fn buy_currency() {}

/// OpenAPI documentation for the FX buyer API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FX Buyer API",
        version = "1.0.0",
        description = "Read exchange rates and the cash balance, self-issue cash, and buy currency through an FX service.\n\nEvery error response has the shape `{\"message\": \"...\"}`.",
        license(name = "MIT"),
    ),
    paths(
        health,
        read_exchange_rate,
        read_cash_balance,
        self_issue_cash,
        buy_currency,
    ),
    components(
        schemas(
            CurrencyCode,
            MoneyAmount,
            ExchangeRateResponse,
            IssueCashRequest,
            PurchaseRequest,
            InsufficientFundsResponse,
            MessageResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rates", description = "Exchange rate lookup"),
        (name = "cash", description = "Cash balance and issuance"),
        (name = "purchases", description = "Currency purchases"),
    )
)]
pub struct ApiDoc;
