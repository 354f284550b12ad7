//! FX service port.
//!
//! Rate lookup, cash balance, cash issuance and currency purchase. Ledger
//! state and settlement live entirely behind this trait.

use crate::domain::{CurrencyCode, ExchangeRate, MoneyAmount, PurchaseResult};
use crate::error::FxError;

/// Port trait for FX backends.
///
/// Implementations are responsible for their own consistency: issuing cash
/// and buying currency MUST be atomic with respect to concurrent callers.
#[async_trait::async_trait]
pub trait FxService: Send + Sync + 'static {
    /// Looks up the rate for `from -> to`. `Ok(None)` when no rate is known.
    async fn query_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<Option<ExchangeRate>, FxError>;

    /// Current cash balance.
    async fn balance(&self) -> Result<MoneyAmount, FxError>;

    /// Issues `amount` of cash to ourselves.
    async fn self_issue_cash(&self, amount: MoneyAmount) -> Result<(), FxError>;

    /// Buys `amount`, paying in `currency`.
    async fn buy_money_amount(
        &self,
        amount: MoneyAmount,
        currency: CurrencyCode,
    ) -> Result<PurchaseResult, FxError>;
}
