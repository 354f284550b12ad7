//! Buyer Application Service
//!
//! Validates requests and delegates to the FX service port.
//! Contains NO infrastructure logic and holds no state of its own.

use fx_types::{AppError, CurrencyCode, ExchangeRate, FxService, MoneyAmount, PurchaseResult};

/// Message returned when the FX service knows no rate for a pair.
pub const NO_RATE_FOUND: &str = "No exchange rate found.";

/// Application service for the buyer endpoints.
///
/// Generic over `F: FxService` - the backend is injected at compile time.
/// This enables:
/// - Swapping FX backends without code changes
/// - Testing with an in-memory desk or a mock
/// - Compile-time checks for port implementation
pub struct BuyerService<F: FxService> {
    fx: F,
}

impl<F: FxService> BuyerService<F> {
    /// Creates a new buyer service over the given FX backend.
    pub fn new(fx: F) -> Self {
        Self { fx }
    }

    #[cfg(test)]
    pub(crate) fn fx(&self) -> &F {
        &self.fx
    }

    /// Looks up the rate for `from -> to`.
    pub async fn exchange_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<ExchangeRate, AppError> {
        self.fx
            .query_rate(from, to)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(NO_RATE_FOUND.into())))
    }

    /// Reads the cash balance.
    pub async fn cash_balance(&self) -> Result<MoneyAmount, AppError> {
        self.fx.balance().await.map_err(Into::into)
    }

    /// Issues cash to ourselves.
    pub async fn issue_cash(&self, amount: MoneyAmount) -> Result<(), AppError> {
        amount.ensure_positive()?;

        self.fx.self_issue_cash(amount).await.map_err(Into::into)
    }

    /// Buys `amount`, paying in `currency`.
    ///
    /// A shortfall comes back as `Ok` with the missing amount set.
    pub async fn buy(
        &self,
        amount: MoneyAmount,
        currency: CurrencyCode,
    ) -> Result<PurchaseResult, AppError> {
        amount.ensure_positive()?;

        self.fx
            .buy_money_amount(amount, currency)
            .await
            .map_err(Into::into)
    }
}
