//! Currency codes and decimal money amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::DomainError;

/// A three-letter currency identifier, always stored upper case.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String)]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    pub const USD: CurrencyCode = CurrencyCode(*b"USD");
    pub const EUR: CurrencyCode = CurrencyCode(*b"EUR");
    pub const GBP: CurrencyCode = CurrencyCode(*b"GBP");
    pub const INR: CurrencyCode = CurrencyCode(*b"INR");
    pub const JPY: CurrencyCode = CurrencyCode(*b"JPY");
    pub const CHF: CurrencyCode = CurrencyCode(*b"CHF");

    /// Parses a currency code, accepting lower or mixed case input.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(DomainError::InvalidCurrencyCode(input.to_string()));
        }
        let mut code = [0u8; 3];
        for (slot, byte) in code.iter_mut().zip(bytes) {
            *slot = byte.to_ascii_uppercase();
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters ever reach the inner array.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_string()
    }
}

/// A decimal quantity of a single currency.
///
/// Quantities are never negative. Whether zero is acceptable depends on
/// the operation, see [`MoneyAmount::ensure_positive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "RawMoneyAmount")]
pub struct MoneyAmount {
    /// Decimal quantity, serialized as a string to keep precision
    #[schema(value_type = String, example = "100.00")]
    quantity: Decimal,
    currency: CurrencyCode,
}

#[derive(Deserialize)]
struct RawMoneyAmount {
    quantity: Decimal,
    currency: CurrencyCode,
}

impl TryFrom<RawMoneyAmount> for MoneyAmount {
    type Error = DomainError;

    fn try_from(raw: RawMoneyAmount) -> Result<Self, Self::Error> {
        MoneyAmount::new(raw.quantity, raw.currency)
    }
}

impl MoneyAmount {
    /// Creates a new amount, rejecting negative quantities.
    pub fn new(quantity: Decimal, currency: CurrencyCode) -> Result<Self, DomainError> {
        if quantity.is_sign_negative() && !quantity.is_zero() {
            return Err(DomainError::NegativeQuantity(quantity));
        }
        Ok(Self { quantity, currency })
    }

    /// Creates a zero amount for the given currency.
    pub fn zero(currency: CurrencyCode) -> Self {
        Self {
            quantity: Decimal::ZERO,
            currency,
        }
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn currency(&self) -> CurrencyCode {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Fails unless the quantity is strictly greater than zero.
    pub fn ensure_positive(&self) -> Result<(), DomainError> {
        if self.quantity > Decimal::ZERO {
            Ok(())
        } else {
            Err(DomainError::NonPositiveAmount(*self))
        }
    }
}

impl fmt::Display for MoneyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.currency)
    }
}
