//! In-memory FX desk.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use tokio::sync::Mutex;

use fx_types::{CurrencyCode, ExchangeRate, FxError, FxService, MoneyAmount, PurchaseResult};

use crate::rates::RateTable;

/// Decimal places on every reported cash quantity.
const CASH_SCALE: u32 = 2;

/// An [`FxService`] that keeps cash holdings in memory.
///
/// Holdings are tracked per currency. The balance is reported in a single
/// base currency by valuing every holding at the table rate.
pub struct InMemoryFxDesk {
    rates: RateTable,
    base_currency: CurrencyCode,
    holdings: Mutex<HashMap<CurrencyCode, Decimal>>,
}

impl InMemoryFxDesk {
    /// Creates an empty desk reporting its balance in `base_currency`.
    pub fn new(rates: RateTable, base_currency: CurrencyCode) -> Self {
        Self {
            rates,
            base_currency,
            holdings: Mutex::new(HashMap::new()),
        }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn base_currency(&self) -> CurrencyCode {
        self.base_currency
    }

    /// Cash currently held in `currency`.
    pub async fn holding(&self, currency: CurrencyCode) -> MoneyAmount {
        let quantity = self
            .holdings
            .lock()
            .await
            .get(&currency)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let quantity = to_cash_scale(quantity, RoundingStrategy::MidpointAwayFromZero);
        MoneyAmount::new(quantity, currency).unwrap_or_else(|_| MoneyAmount::zero(currency))
    }

    fn rate_or_invalid(&self, from: CurrencyCode, to: CurrencyCode) -> Result<Decimal, FxError> {
        self.rates.rate(from, to).ok_or_else(|| {
            FxError::InvalidArgument(format!("No exchange rate from {} to {}", from, to))
        })
    }
}

/// Rounds to cash precision and pins the scale so "5" reports as "5.00".
fn to_cash_scale(quantity: Decimal, strategy: RoundingStrategy) -> Decimal {
    let mut rounded = quantity.round_dp_with_strategy(CASH_SCALE, strategy);
    rounded.rescale(CASH_SCALE);
    rounded
}

fn overflow() -> FxError {
    FxError::InvalidArgument("Amount is too large".into())
}

#[async_trait]
impl FxService for InMemoryFxDesk {
    async fn query_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<Option<ExchangeRate>, FxError> {
        Ok(self
            .rates
            .rate(from, to)
            .map(|rate| ExchangeRate::new(from, to, rate)))
    }

    async fn balance(&self) -> Result<MoneyAmount, FxError> {
        let holdings = self.holdings.lock().await;
        let mut total = Decimal::ZERO;
        for (&currency, &quantity) in holdings.iter() {
            let rate = self.rates.rate(currency, self.base_currency).ok_or_else(|| {
                FxError::Internal(format!(
                    "cannot value {currency} holdings in {}",
                    self.base_currency
                ))
            })?;
            let value = quantity
                .checked_mul(rate)
                .ok_or_else(|| FxError::Internal("balance overflow".into()))?;
            total = total
                .checked_add(value)
                .ok_or_else(|| FxError::Internal("balance overflow".into()))?;
        }

        let total = to_cash_scale(total, RoundingStrategy::MidpointAwayFromZero);
        MoneyAmount::new(total, self.base_currency).map_err(|e| FxError::Internal(e.to_string()))
    }

    async fn self_issue_cash(&self, amount: MoneyAmount) -> Result<(), FxError> {
        amount.ensure_positive()?;
        if !self.rates.contains(amount.currency()) {
            return Err(FxError::InvalidArgument(format!(
                "Unsupported currency: {}",
                amount.currency()
            )));
        }

        let mut holdings = self.holdings.lock().await;
        let held = holdings.entry(amount.currency()).or_insert(Decimal::ZERO);
        *held = held.checked_add(amount.quantity()).ok_or_else(overflow)?;

        tracing::debug!(%amount, "issued cash");
        Ok(())
    }

    async fn buy_money_amount(
        &self,
        amount: MoneyAmount,
        currency: CurrencyCode,
    ) -> Result<PurchaseResult, FxError> {
        amount.ensure_positive()?;
        let rate = self.rate_or_invalid(amount.currency(), currency)?;
        let cost = amount
            .quantity()
            .checked_mul(rate)
            .map(|cost| to_cash_scale(cost, RoundingStrategy::AwayFromZero))
            .ok_or_else(overflow)?;

        // Check and transfer under one lock so concurrent purchases can't overdraw.
        let mut holdings = self.holdings.lock().await;
        let available = holdings.get(&currency).copied().unwrap_or(Decimal::ZERO);
        if available < cost {
            let missing = MoneyAmount::new(
                to_cash_scale(cost - available, RoundingStrategy::AwayFromZero),
                currency,
            )?;
            tracing::debug!(%amount, %missing, "purchase not funded");
            return Ok(PurchaseResult::short_by(missing));
        }

        // Both new quantities are computed before either entry is written.
        let remaining = available - cost;
        let held = if amount.currency() == currency {
            remaining
        } else {
            holdings.get(&amount.currency()).copied().unwrap_or(Decimal::ZERO)
        };
        let bought = held.checked_add(amount.quantity()).ok_or_else(overflow)?;
        holdings.insert(currency, remaining);
        holdings.insert(amount.currency(), bought);

        tracing::debug!(%amount, paid = %cost, currency = %currency, "purchase completed");
        Ok(PurchaseResult::completed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn money(quantity: &str, currency: CurrencyCode) -> MoneyAmount {
        MoneyAmount::new(dec(quantity), currency).unwrap()
    }

    fn desk() -> InMemoryFxDesk {
        let rates = RateTable::empty()
            .with_currency(CurrencyCode::USD, Decimal::ONE)
            .with_currency(CurrencyCode::EUR, dec("1.25"));
        InMemoryFxDesk::new(rates, CurrencyCode::USD)
    }

    #[tokio::test]
    async fn test_empty_desk_balance_is_zero() {
        let balance = desk().balance().await.unwrap();
        assert_eq!(balance, money("0.00", CurrencyCode::USD));
        assert_eq!(balance.to_string(), "0.00 USD");
    }

    #[tokio::test]
    async fn test_self_issue_cash_increases_balance() {
        let desk = desk();
        desk.self_issue_cash(money("100", CurrencyCode::USD))
            .await
            .unwrap();

        let balance = desk.balance().await.unwrap();
        assert_eq!(balance.to_string(), "100.00 USD");
    }

    #[tokio::test]
    async fn test_balance_values_foreign_holdings_in_base_currency() {
        let desk = desk();
        desk.self_issue_cash(money("10", CurrencyCode::USD))
            .await
            .unwrap();
        desk.self_issue_cash(money("4", CurrencyCode::EUR))
            .await
            .unwrap();

        let balance = desk.balance().await.unwrap();
        assert_eq!(balance, money("15.00", CurrencyCode::USD));
    }

    #[tokio::test]
    async fn test_self_issue_rejects_unknown_currency() {
        let desk = desk();
        let result = desk
            .self_issue_cash(money("1", CurrencyCode::GBP))
            .await;
        assert!(matches!(result, Err(FxError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_self_issue_rejects_zero() {
        let result = desk().self_issue_cash(MoneyAmount::zero(CurrencyCode::USD)).await;
        assert!(matches!(result, Err(FxError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_query_rate() {
        let desk = desk();
        let rate = desk
            .query_rate(CurrencyCode::EUR, CurrencyCode::USD)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rate.rate, dec("1.25"));

        let missing = desk
            .query_rate(CurrencyCode::EUR, CurrencyCode::GBP)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_funded_purchase_moves_cash() {
        let desk = desk();
        desk.self_issue_cash(money("20", CurrencyCode::USD))
            .await
            .unwrap();

        let result = desk
            .buy_money_amount(money("10", CurrencyCode::EUR), CurrencyCode::USD)
            .await
            .unwrap();

        assert!(result.is_completed());
        assert_eq!(
            desk.holding(CurrencyCode::USD).await,
            money("7.50", CurrencyCode::USD)
        );
        assert_eq!(
            desk.holding(CurrencyCode::EUR).await,
            money("10", CurrencyCode::EUR)
        );
        // Value is preserved at the table rate.
        assert_eq!(
            desk.balance().await.unwrap(),
            money("20", CurrencyCode::USD)
        );
    }

    #[tokio::test]
    async fn test_shortfall_reports_missing_and_leaves_holdings() {
        let desk = desk();
        desk.self_issue_cash(money("5", CurrencyCode::USD))
            .await
            .unwrap();

        let result = desk
            .buy_money_amount(money("10", CurrencyCode::EUR), CurrencyCode::USD)
            .await
            .unwrap();

        let missing = result.missing_amount.unwrap();
        assert_eq!(missing.to_string(), "7.50 USD");
        assert_eq!(
            desk.holding(CurrencyCode::USD).await,
            money("5", CurrencyCode::USD)
        );
        assert!(desk.holding(CurrencyCode::EUR).await.is_zero());
    }

    #[tokio::test]
    async fn test_cost_rounds_up_to_cents() {
        let rates = RateTable::empty()
            .with_currency(CurrencyCode::USD, Decimal::ONE)
            .with_currency(CurrencyCode::GBP, dec("1.333"));
        let desk = InMemoryFxDesk::new(rates, CurrencyCode::USD);

        // 1 GBP costs 1.333 USD, charged as 1.34.
        let result = desk
            .buy_money_amount(money("1", CurrencyCode::GBP), CurrencyCode::USD)
            .await
            .unwrap();
        assert_eq!(result.missing_amount, Some(money("1.34", CurrencyCode::USD)));
    }

    #[tokio::test]
    async fn test_overflowing_purchase_leaves_holdings_untouched() {
        let desk = desk();
        desk.self_issue_cash(money("10", CurrencyCode::USD))
            .await
            .unwrap();
        desk.self_issue_cash(MoneyAmount::new(Decimal::MAX, CurrencyCode::EUR).unwrap())
            .await
            .unwrap();

        let result = desk
            .buy_money_amount(money("1", CurrencyCode::EUR), CurrencyCode::USD)
            .await;

        assert!(matches!(result, Err(FxError::InvalidArgument(_))));
        assert_eq!(
            desk.holding(CurrencyCode::USD).await,
            money("10", CurrencyCode::USD)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_purchases_never_overdraw() {
        let desk = Arc::new(desk());
        desk.self_issue_cash(money("10", CurrencyCode::USD))
            .await
            .unwrap();

        // Each purchase of 8 EUR costs exactly 10 USD.
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let desk = Arc::clone(&desk);
                tokio::spawn(async move {
                    desk.buy_money_amount(money("8", CurrencyCode::EUR), CurrencyCode::USD)
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut completed = 0;
        for task in tasks {
            let result = task.await.unwrap();
            if result.is_completed() {
                completed += 1;
            } else {
                assert_eq!(
                    result.missing_amount,
                    Some(money("10", CurrencyCode::USD))
                );
            }
        }

        assert_eq!(completed, 1);
        assert_eq!(
            desk.holding(CurrencyCode::USD).await.to_string(),
            "0.00 USD"
        );
        assert_eq!(
            desk.holding(CurrencyCode::EUR).await,
            money("8", CurrencyCode::EUR)
        );
    }

    #[tokio::test]
    async fn test_purchase_of_paying_currency_keeps_holdings() {
        let desk = desk();
        desk.self_issue_cash(money("10", CurrencyCode::USD))
            .await
            .unwrap();

        let result = desk
            .buy_money_amount(money("4", CurrencyCode::USD), CurrencyCode::USD)
            .await
            .unwrap();

        assert!(result.is_completed());
        assert_eq!(
            desk.holding(CurrencyCode::USD).await,
            money("10", CurrencyCode::USD)
        );
    }

    #[tokio::test]
    async fn test_purchase_without_rate_is_invalid() {
        let result = desk()
            .buy_money_amount(money("1", CurrencyCode::GBP), CurrencyCode::USD)
            .await;
        assert!(matches!(result, Err(FxError::InvalidArgument(_))));
    }
}
