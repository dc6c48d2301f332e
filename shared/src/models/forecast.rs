//! Forecast series models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PayloadShapeError;
use crate::types::{calendar_date, parse_calendar_date};

/// Number of days covered by each upstream forecast series
pub const FORECAST_WINDOW_DAYS: usize = 7;

/// One day of an upstream forecast series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    pub value: f64,
}

impl ForecastPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Forecast point as it arrives on the wire
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastPointPayload {
    pub date: Option<String>,
    pub value: Option<f64>,
}

/// The three parallel forecast series of a field dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastKind {
    Temperature,
    Gdd,
    Humidity,
}

impl ForecastKind {
    /// Key under which the series is published by the upstream source
    pub fn wire_name(&self) -> &'static str {
        match self {
            ForecastKind::Temperature => "SevenDayTempForecast",
            ForecastKind::Gdd => "SevenDayGDDForecast",
            ForecastKind::Humidity => "SevenDayHumidityForecast",
        }
    }

    fn date_field(&self) -> &'static str {
        match self {
            ForecastKind::Temperature => "SevenDayTempForecast[].date",
            ForecastKind::Gdd => "SevenDayGDDForecast[].date",
            ForecastKind::Humidity => "SevenDayHumidityForecast[].date",
        }
    }

    fn value_field(&self) -> &'static str {
        match self {
            ForecastKind::Temperature => "SevenDayTempForecast[].value",
            ForecastKind::Gdd => "SevenDayGDDForecast[].value",
            ForecastKind::Humidity => "SevenDayHumidityForecast[].value",
        }
    }
}

/// Rehydrate one forecast series, rejecting an absent sequence
pub fn parse_forecast_series(
    kind: ForecastKind,
    raw: Option<Vec<ForecastPointPayload>>,
) -> Result<Vec<ForecastPoint>, PayloadShapeError> {
    let raw = raw.ok_or(PayloadShapeError::MissingField(kind.wire_name()))?;

    raw.into_iter()
        .map(|point| {
            let raw_date = point
                .date
                .ok_or(PayloadShapeError::MissingField(kind.date_field()))?;
            let date = parse_calendar_date(&raw_date).ok_or(PayloadShapeError::InvalidDate {
                field: kind.date_field(),
                value: raw_date,
            })?;
            let value = point
                .value
                .ok_or(PayloadShapeError::MissingField(kind.value_field()))?;
            Ok(ForecastPoint { date, value })
        })
        .collect()
}

/// Dates of a series, in forecast order
pub fn series_dates(points: &[ForecastPoint]) -> Vec<NaiveDate> {
    points.iter().map(|p| p.date).collect()
}

/// Values of a series, in forecast order
pub fn series_values(points: &[ForecastPoint]) -> Vec<f64> {
    points.iter().map(|p| p.value).collect()
}
