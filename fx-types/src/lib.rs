//! # FX Types
//!
//! Domain types and port traits for the FX buyer service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyCode, MoneyAmount, ExchangeRate)
//! - `ports/` - The `FxService` trait that FX backends must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, port, and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{CurrencyCode, ExchangeRate, MoneyAmount, PurchaseResult};
pub use dto::*;
pub use error::{AppError, DomainError, FxError};
pub use ports::FxService;
