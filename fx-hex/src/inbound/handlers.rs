//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use fx_types::{
    AppError, CurrencyCode, ExchangeRateQuery, ExchangeRateResponse, FxService,
    InsufficientFundsResponse, IssueCashRequest, PurchaseRequest,
};

use super::codec::{ApiError, JsonBody};
use crate::BuyerService;

pub const UNSPECIFIED_CURRENCIES: &str =
    "Unspecified 'from' and 'to' currency codes query parameters.";

/// Application state shared across handlers.
pub struct AppState<F: FxService> {
    pub service: BuyerService<F>,
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Read the exchange rate for a currency pair.
#[tracing::instrument(skip(state, query))]
pub async fn read_exchange_rate<F: FxService>(
    State(state): State<Arc<AppState<F>>>,
    query: Result<Query<ExchangeRateQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Received read exchange rate request.");
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    // Malformed codes are reported before absent ones.
    let from = parse_optional_code(query.from.as_deref())?;
    let to = parse_optional_code(query.to.as_deref())?;
    let (Some(from), Some(to)) = (from, to) else {
        return Err(AppError::BadRequest(UNSPECIFIED_CURRENCIES.into()).into());
    };

    let rate = state.service.exchange_rate(from, to).await?;
    Ok(Json(ExchangeRateResponse::new(from, to, &rate)))
}

fn parse_optional_code(raw: Option<&str>) -> Result<Option<CurrencyCode>, AppError> {
    raw.map(CurrencyCode::parse)
        .transpose()
        .map_err(AppError::from)
}

/// Read the cash balance.
#[tracing::instrument(skip(state))]
pub async fn read_cash_balance<F: FxService>(
    State(state): State<Arc<AppState<F>>>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Received read cash balance request.");
    let balance = state.service.cash_balance().await?;
    Ok(Json(balance))
}

/// Self-issue cash.
#[tracing::instrument(skip(state, req))]
pub async fn self_issue_cash<F: FxService>(
    State(state): State<Arc<AppState<F>>>,
    JsonBody(req): JsonBody<IssueCashRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(amount = %req.amount, "Received cash issuance request.");
    state.service.issue_cash(req.amount).await?;
    Ok(StatusCode::CREATED)
}

/// Buy a money amount, paying in another currency.
#[tracing::instrument(skip(state, req))]
pub async fn buy_currency<F: FxService>(
    State(state): State<Arc<AppState<F>>>,
    JsonBody(req): JsonBody<PurchaseRequest>,
) -> Result<Response, ApiError> {
    tracing::info!(
        amount = %req.amount,
        currency = %req.currency,
        "Received cash acquisition request."
    );
    let result = state.service.buy(req.amount, req.currency).await?;

    Ok(match result.missing_amount {
        None => StatusCode::CREATED.into_response(),
        Some(missing) => {
            tracing::info!(%missing, "purchase rejected for insufficient funds");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(InsufficientFundsResponse::new(missing)),
            )
                .into_response()
        }
    })
}
