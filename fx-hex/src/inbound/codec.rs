//! Shared JSON codec for the HTTP adapter.
//!
//! Every error leaves the server as `{"message": "..."}`. Request bodies go
//! through [`JsonBody`], which tells a missing body apart from a malformed one.

use std::any::Any;

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use fx_types::{AppError, MessageResponse};

pub const MISSING_BODY: &str = "Missing mandatory request body.";
pub const UNKNOWN_ERROR: &str = "Unknown error.";

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::BadRequest(msg) => message(StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => message(StatusCode::NOT_FOUND, msg),
            AppError::UnsupportedMediaType(msg) => {
                message(StatusCode::UNSUPPORTED_MEDIA_TYPE, msg)
            }
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                message(StatusCode::INTERNAL_SERVER_ERROR, UNKNOWN_ERROR)
            }
        }
    }
}

/// Builds a `{"message": ...}` response.
pub fn message(status: StatusCode, text: impl Into<String>) -> Response {
    (status, Json(MessageResponse::new(text))).into_response()
}

/// Decodes a JSON request body.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest(MISSING_BODY.into()));
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))
}

/// Rejects a declared `Content-Type` that isn't JSON.
///
/// An absent header is accepted so that a bare empty POST still reports the
/// missing body.
pub fn ensure_json_content(headers: &HeaderMap) -> Result<(), AppError> {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return Ok(());
    };
    let declared = value.to_str().unwrap_or_default();
    let mime = declared.split(';').next().unwrap_or_default().trim();
    let is_json = mime.eq_ignore_ascii_case("application/json")
        || mime.to_ascii_lowercase().ends_with("+json");
    if is_json {
        Ok(())
    } else {
        Err(AppError::UnsupportedMediaType(format!(
            "Unsupported content type '{}', expected application/json.",
            declared
        )))
    }
}

/// JSON body extractor that rejects with the adapter's own error responses.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        ensure_json_content(req.headers())?;
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(JsonBody(decode(&bytes)?))
    }
}

/// Turns a handler panic into the same opaque 500 as any other failure.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = %detail, "handler panicked");
    message(StatusCode::INTERNAL_SERVER_ERROR, UNKNOWN_ERROR)
}
