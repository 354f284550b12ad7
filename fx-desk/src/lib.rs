//! # FX Desk
//!
//! An in-memory [`FxService`](fx_types::FxService) for local runs and tests.
//! Rates come from a hardcoded table of USD values; cash holdings live in a
//! mutex-guarded map and vanish with the process.
//!
//! # Example
//! ```
//! use fx_desk::{InMemoryFxDesk, RateTable};
//! use fx_types::CurrencyCode;
//!
//! let desk = InMemoryFxDesk::new(RateTable::default(), CurrencyCode::USD);
//! let rate = desk.rates().rate(CurrencyCode::EUR, CurrencyCode::USD);
//! assert!(rate.is_some());
//! ```

mod desk;
mod rates;

pub use desk::InMemoryFxDesk;
pub use rates::{RATE_SCALE, RateTable};
