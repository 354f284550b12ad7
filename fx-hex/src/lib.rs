//! # FX Hex
//!
//! Application service layer and HTTP adapter for the FX buyer service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (validates input, delegates to the FX port)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `F: FxService`, allowing different FX
//! backends to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::BuyerService;
