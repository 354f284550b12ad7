//! Port traits (interfaces for adapters).
//!
//! The HTTP adapter depends on these traits, not on a concrete FX backend.

mod fx_service;

pub use fx_service::FxService;
