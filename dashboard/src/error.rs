//! Error handling for the GDD field dashboard
//!
//! Every error is scoped to the operation that raised it; none of them ends
//! the dashboard session.

use serde::Serialize;
use shared::PayloadShapeError;
use thiserror::Error;

/// Failures talking to the upstream dashboard API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Unexpected payload shape: {0}")]
    Shape(#[from] PayloadShapeError),
}

/// Dashboard session error types
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to load dashboard: {0}")]
    FetchFailure(#[source] ApiError),

    #[error("Validation error: {0}")]
    ValidationFailure(#[from] validator::ValidationErrors),

    #[error("Request rejected: {0}")]
    MutationFailure(#[source] ApiError),

    #[error("No {0} selected")]
    MissingSelection(&'static str),
}

impl DashboardError {
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::FetchFailure(_) => "FETCH_FAILURE",
            DashboardError::ValidationFailure(_) => "VALIDATION_ERROR",
            DashboardError::MutationFailure(_) => "MUTATION_FAILURE",
            DashboardError::MissingSelection(_) => "MISSING_SELECTION",
        }
    }

    /// Form fields that failed validation, by wire name, sorted
    pub fn invalid_fields(&self) -> Vec<String> {
        match self {
            DashboardError::ValidationFailure(errors) => invalid_fields(errors),
            _ => Vec::new(),
        }
    }
}

pub(crate) fn invalid_fields(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    fields
}

/// User-facing snapshot of the last error a session hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl From<&DashboardError> for ErrorDetail {
    fn from(error: &DashboardError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
            fields: error.invalid_fields(),
        }
    }
}

/// Result type alias for session operations
pub type DashboardResult<T> = Result<T, DashboardError>;
