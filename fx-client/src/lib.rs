//! # FX Client SDK
//!
//! A typed Rust client for the FX buyer API.

use fx_types::{
    CurrencyCode, ExchangeRateResponse, InsufficientFundsResponse, IssueCashRequest,
    MoneyAmount, PurchaseRequest,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a purchase request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Completed,
    /// The server answered 422: not enough cash in the paying currency.
    Insufficient {
        message: String,
        missing: MoneyAmount,
    },
}

/// FX buyer API client.
pub struct FxClient {
    base_url: String,
    http: Client,
}

impl FxClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Reads the exchange rate for `from -> to`.
    pub async fn exchange_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<ExchangeRateResponse, ClientError> {
        let resp = self
            .http
            .get(format!("{}/api/exchangeRate", self.base_url))
            .query(&[("from", from.as_str()), ("to", to.as_str())])
            .send()
            .await?;
        self.handle_json(resp).await
    }

    /// Reads the cash balance.
    pub async fn cash_balance(&self) -> Result<MoneyAmount, ClientError> {
        let resp = self
            .http
            .get(format!("{}/api/cash", self.base_url))
            .send()
            .await?;
        self.handle_json(resp).await
    }

    /// Self-issues cash.
    pub async fn issue_cash(&self, amount: MoneyAmount) -> Result<(), ClientError> {
        let resp = self
            .post("/api/cash", &IssueCashRequest { amount })
            .await?;
        self.handle_empty(resp).await
    }

    /// Buys `amount`, paying in `currency`.
    pub async fn buy(
        &self,
        amount: MoneyAmount,
        currency: CurrencyCode,
    ) -> Result<PurchaseOutcome, ClientError> {
        let resp = self
            .post("/api/purchases", &PurchaseRequest { amount, currency })
            .await?;

        if resp.status() == StatusCode::UNPROCESSABLE_ENTITY {
            let body: InsufficientFundsResponse = serde_json::from_str(&resp.text().await?)?;
            return Ok(PurchaseOutcome::Insufficient {
                message: body.message,
                missing: body.missing,
            });
        }

        self.handle_empty(resp).await?;
        Ok(PurchaseOutcome::Completed)
    }

    async fn post<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ClientError> {
        Ok(self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?)
    }

    async fn handle_json<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), ClientError> {
        Self::check_status(resp).await.map(|_| ())
    }

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Pulls `message` out of an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FxClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = FxClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_error_message_from_envelope() {
        assert_eq!(
            error_message(r#"{"message": "No exchange rate found."}"#),
            "No exchange rate found."
        );
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
