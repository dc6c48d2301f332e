//! Shared types and logic for the GDD field dashboard
//!
//! This crate holds the domain models, payload validation and the pure
//! derivations (smoothing, cutting status, chart specs) used by both the
//! dashboard client and the WASM bindings.

pub mod chart;
pub mod cutting;
pub mod error;
pub mod models;
pub mod smoothing;
pub mod types;
pub mod validation;

pub use chart::*;
pub use cutting::*;
pub use error::*;
pub use models::*;
pub use smoothing::*;
pub use types::*;
pub use validation::*;
