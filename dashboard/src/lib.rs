//! GDD field dashboard
//!
//! Loads field and farm dashboards from the upstream API, derives cutting
//! status and forecast charts, and keeps each dashboard session's view-model
//! consistent across sensor and farm mutations.

pub mod clock;
pub mod config;
pub mod error;
pub mod external;
pub mod render;
pub mod services;

pub use config::Config;
pub use error::{ApiError, DashboardError, DashboardResult, ErrorDetail};
