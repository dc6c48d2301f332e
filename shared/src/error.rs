//! Payload shape errors raised while rehydrating upstream dashboard data

use thiserror::Error;

/// The upstream payload did not have the shape the dashboard binds to
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadShapeError {
    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid date in {field}: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("{series} does not share the forecast date axis: {reason}")]
    MisalignedSeries {
        series: &'static str,
        reason: String,
    },
}
