//! Outcome of a currency purchase attempt.

use serde::{Deserialize, Serialize};

use super::money::MoneyAmount;

/// Result of asking the FX service to buy a money amount.
///
/// A shortfall is an ordinary outcome rather than an error: the service
/// reports how much of the paying currency was missing and leaves the
/// ledger untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PurchaseResult {
    pub missing_amount: Option<MoneyAmount>,
}

impl PurchaseResult {
    /// The purchase was fully funded.
    pub fn completed() -> Self {
        Self {
            missing_amount: None,
        }
    }

    /// The purchase could not be funded; `missing` is the shortfall.
    pub fn short_by(missing: MoneyAmount) -> Self {
        Self {
            missing_amount: Some(missing),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.missing_amount.is_none()
    }
}
