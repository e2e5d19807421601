//! Shipping engine: rate configuration, transport mode selection, freight
//! cost calculation and the option list offered at checkout.
//!
//! Everything here is synchronous and pure over its inputs; callers resolve
//! the catalog and snapshot the cart before quoting.

pub mod rates;
pub mod mode;
pub mod cost;
pub mod options;

pub use rates::{AirRate, BoatRate, CategoryProfile, RateError, RateTable};
pub use mode::{requires_boat, resolve_mode, select_mode, ModeDecision, TransportMode, UnrecognizedMode};
pub use cost::{BoatCandidates, CostCalculator, Quote};
pub use options::{ShippingOption, ShippingOptionsBuilder};
