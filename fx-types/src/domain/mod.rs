//! Domain models for the FX buyer service.

pub mod money;
pub mod purchase;
pub mod rate;

pub use money::{CurrencyCode, MoneyAmount};
pub use purchase::PurchaseResult;
pub use rate::ExchangeRate;
