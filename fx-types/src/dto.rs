//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CurrencyCode, ExchangeRate, MoneyAmount};

// ─────────────────────────────────────────────────────────────────────────────
// Exchange Rate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters of the exchange rate endpoint.
///
/// Kept as raw strings so that parse failures and absent parameters can be
/// reported separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExchangeRateQuery {
    /// Currency to convert from
    #[param(example = "EUR")]
    pub from: Option<String>,
    /// Currency to convert to
    #[param(example = "USD")]
    pub to: Option<String>,
}

/// Exchange rate between two currencies.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRateResponse {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    /// Units of `to` per unit of `from`
    #[schema(value_type = String, example = "1.087")]
    pub rate: Decimal,
}

impl ExchangeRateResponse {
    /// Echoes the requested pair alongside the rate value.
    pub fn new(from: CurrencyCode, to: CurrencyCode, rate: &ExchangeRate) -> Self {
        Self {
            from,
            to,
            rate: rate.rate,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cash DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to self-issue cash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueCashRequest {
    pub amount: MoneyAmount,
}

/// Request to buy a money amount.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurchaseRequest {
    /// Amount to acquire
    pub amount: MoneyAmount,
    /// Currency to pay with
    pub currency: CurrencyCode,
}

/// Body returned when a purchase cannot be funded.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsufficientFundsResponse {
    pub message: String,
    /// Shortfall in the paying currency
    pub missing: MoneyAmount,
}

impl InsufficientFundsResponse {
    pub fn new(missing: MoneyAmount) -> Self {
        Self {
            message: format!(
                "Insufficient funds to buy given money amount. Missing {}.",
                missing
            ),
            missing,
        }
    }
}

/// Generic message envelope used for every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Unknown error.")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
