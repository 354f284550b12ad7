//! Hardcoded exchange rate table.
//!
//! Every currency is priced in USD; cross rates divide one USD value by
//! another, so the table stays consistent in both directions.

use std::collections::HashMap;

use fx_types::CurrencyCode;
use rust_decimal::Decimal;

/// Decimal places kept on every cross rate.
pub const RATE_SCALE: u32 = 6;

// ─────────────────────────────────────────────────────────────────────────────
// DEFAULT RATES - value of one unit in USD, as (mantissa, scale)
// ─────────────────────────────────────────────────────────────────────────────

const DEFAULT_USD_VALUES: &[(CurrencyCode, i64, u32)] = &[
    (CurrencyCode::USD, 1, 0),
    (CurrencyCode::EUR, 1087, 3),
    (CurrencyCode::GBP, 1266, 3),
    (CurrencyCode::INR, 1203, 5),
    (CurrencyCode::JPY, 67, 4),
    (CurrencyCode::CHF, 112, 2),
];

/// Exchange rates keyed by the USD value of each currency.
#[derive(Debug, Clone)]
pub struct RateTable {
    usd_values: HashMap<CurrencyCode, Decimal>,
}

impl Default for RateTable {
    fn default() -> Self {
        DEFAULT_USD_VALUES
            .iter()
            .fold(Self::empty(), |table, &(code, mantissa, scale)| {
                table.with_currency(code, Decimal::new(mantissa, scale))
            })
    }
}

impl RateTable {
    /// A table that knows no currencies.
    pub fn empty() -> Self {
        Self {
            usd_values: HashMap::new(),
        }
    }

    /// Adds or replaces the USD value of one unit of `code`.
    ///
    /// Non-positive values are ignored: a currency worth nothing has no rate.
    pub fn with_currency(mut self, code: CurrencyCode, usd_value: Decimal) -> Self {
        if usd_value > Decimal::ZERO {
            self.usd_values.insert(code, usd_value);
        }
        self
    }

    pub fn contains(&self, code: CurrencyCode) -> bool {
        self.usd_values.contains_key(&code)
    }

    /// Known currencies, sorted by code.
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        let mut codes: Vec<_> = self.usd_values.keys().copied().collect();
        codes.sort();
        codes
    }

    /// Units of `to` received for one unit of `from`.
    pub fn rate(&self, from: CurrencyCode, to: CurrencyCode) -> Option<Decimal> {
        let from_usd = self.usd_values.get(&from)?;
        let to_usd = self.usd_values.get(&to)?;
        if from == to {
            return Some(Decimal::ONE);
        }
        from_usd
            .checked_div(*to_usd)
            .map(|rate| rate.round_dp(RATE_SCALE).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_table_currencies() {
        let table = RateTable::default();
        assert_eq!(table.currencies().len(), DEFAULT_USD_VALUES.len());
        assert!(table.contains(CurrencyCode::INR));
    }

    #[test]
    fn test_same_currency_rate_is_one() {
        let table = RateTable::default();
        assert_eq!(
            table.rate(CurrencyCode::GBP, CurrencyCode::GBP),
            Some(Decimal::ONE)
        );
    }

    #[test]
    fn test_cross_rate() {
        let table = RateTable::default();
        assert_eq!(
            table.rate(CurrencyCode::EUR, CurrencyCode::USD),
            Some(dec("1.087"))
        );
        assert_eq!(
            table.rate(CurrencyCode::USD, CurrencyCode::EUR),
            Some(dec("0.919963"))
        );
    }

    #[test]
    fn test_usd_to_inr_rate() {
        let rate = RateTable::default()
            .rate(CurrencyCode::USD, CurrencyCode::INR)
            .unwrap();
        assert!((rate - dec("83.125520")).abs() < dec("0.000001"));
    }

    #[test]
    fn test_unknown_currency_has_no_rate() {
        let table = RateTable::default();
        let xau = CurrencyCode::parse("XAU").unwrap();
        assert_eq!(table.rate(xau, CurrencyCode::USD), None);
        assert_eq!(table.rate(CurrencyCode::USD, xau), None);
        assert_eq!(table.rate(xau, xau), None);
    }

    #[test]
    fn test_non_positive_values_are_ignored() {
        let table = RateTable::empty().with_currency(CurrencyCode::EUR, Decimal::ZERO);
        assert!(!table.contains(CurrencyCode::EUR));
    }
}
