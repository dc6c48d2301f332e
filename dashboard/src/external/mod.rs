//! Upstream dashboard API integration

pub mod api;
pub mod auth;
pub mod http;

pub use api::DashboardApi;
pub use auth::{StaticToken, TokenSource};
pub use http::HttpDashboardApi;
