//! Configuration loading from environment.

use std::env;

use anyhow::Context;
use fx_types::CurrencyCode;
use rust_decimal::Decimal;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    /// Currency the cash balance is reported in
    pub base_currency: CurrencyCode,
    /// Cash issued in the base currency at startup
    pub opening_balance: Option<Decimal>,
    pub log_format: LogFormat,
    /// OTLP collector; telemetry export is off when unset
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let base_currency = match lookup("FX_BASE_CURRENCY") {
            Some(code) => CurrencyCode::parse(&code).context("FX_BASE_CURRENCY is invalid")?,
            None => CurrencyCode::USD,
        };

        let opening_balance = lookup("FX_OPENING_BALANCE")
            .map(|raw| raw.trim().parse::<Decimal>())
            .transpose()
            .context("FX_OPENING_BALANCE must be a decimal number")?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("plain") => LogFormat::Plain,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!("LOG_FORMAT must be 'plain' or 'json', got '{}'", other),
        };

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|s| !s.trim().is_empty());

        Ok(Self {
            port,
            base_currency,
            opening_balance,
            log_format,
            otlp_endpoint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.base_currency, CurrencyCode::USD);
        assert_eq!(config.opening_balance, None);
        assert_eq!(config.log_format, LogFormat::Plain);
        assert_eq!(config.otlp_endpoint, None);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("FX_BASE_CURRENCY", "eur"),
            ("FX_OPENING_BALANCE", "250.00"),
            ("LOG_FORMAT", "json"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.base_currency, CurrencyCode::EUR);
        assert_eq!(config.opening_balance, Some(Decimal::new(25000, 2)));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        for (key, value) in [
            ("PORT", "not-a-port"),
            ("FX_BASE_CURRENCY", "dollar"),
            ("FX_OPENING_BALANCE", "lots"),
            ("LOG_FORMAT", "xml"),
        ] {
            let err = load(&[(key, value)]).unwrap_err();
            assert!(err.to_string().contains(key), "{key}: {err}");
        }
    }
}
