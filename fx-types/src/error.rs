//! Error types for the FX buyer service.

use rust_decimal::Decimal;

use crate::domain::MoneyAmount;

/// Domain-level errors (validation of values built from input).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid currency code: '{0}'. Expected a three-letter ISO 4217 code")]
    InvalidCurrencyCode(String),

    #[error("Quantity cannot be negative: {0}")]
    NegativeQuantity(Decimal),

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(MoneyAmount),
}

/// Errors raised by an FX service implementation.
#[derive(Debug, thiserror::Error)]
pub enum FxError {
    /// The caller supplied something the service cannot act on.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("FX service unavailable: {0}")]
    Unavailable(String),

    #[error("FX service failure: {0}")]
    Internal(String),
}

impl From<DomainError> for FxError {
    fn from(err: DomainError) -> Self {
        FxError::InvalidArgument(err.to_string())
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Detail is for the server log only; callers get an opaque message.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<FxError> for AppError {
    fn from(err: FxError) -> Self {
        match err {
            FxError::InvalidArgument(msg) => AppError::BadRequest(msg),
            e @ (FxError::Unavailable(_) | FxError::Internal(_)) => {
                AppError::Internal(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_maps_to_bad_request() {
        let err: AppError = FxError::InvalidArgument("unknown pair".into()).into();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "unknown pair"));
    }

    #[test]
    fn test_service_failures_map_to_internal() {
        let err: AppError = FxError::Unavailable("node offline".into()).into();
        assert!(matches!(err, AppError::Internal(ref m) if m.contains("node offline")));

        let err: AppError = FxError::Internal("boom".into()).into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_domain_error_message_names_input() {
        let err: AppError = DomainError::InvalidCurrencyCode("XX".into()).into();
        match err {
            AppError::BadRequest(msg) => assert!(msg.contains("'XX'")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
