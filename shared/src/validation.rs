//! Validation utilities for upstream dashboard data

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::PayloadShapeError;
use crate::models::{ForecastKind, ForecastPoint, FORECAST_WINDOW_DAYS};

// ============================================================================
// Forecast Validations
// ============================================================================

/// Keep the points of `series` dated on `axis`, in their original order.
///
/// Returns the kept points and the number dropped.
pub fn trim_to_axis(
    axis: &[NaiveDate],
    series: Vec<ForecastPoint>,
) -> (Vec<ForecastPoint>, usize) {
    let axis: HashSet<&NaiveDate> = axis.iter().collect();
    let total = series.len();
    let kept: Vec<ForecastPoint> = series
        .into_iter()
        .filter(|point| axis.contains(&point.date))
        .collect();
    let dropped = total - kept.len();
    (kept, dropped)
}

/// Validate that the GDD and humidity series share the temperature series'
/// date axis (same length, same dates, same order).
pub fn validate_forecast_alignment(
    temperature: &[ForecastPoint],
    gdd: &[ForecastPoint],
    humidity: &[ForecastPoint],
) -> Result<(), PayloadShapeError> {
    for (kind, series) in [(ForecastKind::Gdd, gdd), (ForecastKind::Humidity, humidity)] {
        if series.len() != temperature.len() {
            return Err(PayloadShapeError::MisalignedSeries {
                series: kind.wire_name(),
                reason: format!(
                    "expected {} points, found {}",
                    temperature.len(),
                    series.len()
                ),
            });
        }

        if let Some((index, (axis, point))) = temperature
            .iter()
            .zip(series)
            .enumerate()
            .find(|(_, (axis, point))| axis.date != point.date)
        {
            return Err(PayloadShapeError::MisalignedSeries {
                series: kind.wire_name(),
                reason: format!(
                    "point {} is dated {} but the axis has {}",
                    index, point.date, axis.date
                ),
            });
        }
    }
    Ok(())
}

/// Validate that a series is in strictly ascending date order
pub fn validate_chronological(
    kind: ForecastKind,
    series: &[ForecastPoint],
) -> Result<(), PayloadShapeError> {
    match series.windows(2).position(|pair| pair[0].date >= pair[1].date) {
        Some(index) => Err(PayloadShapeError::MisalignedSeries {
            series: kind.wire_name(),
            reason: format!("point {} is not after point {}", index + 1, index),
        }),
        None => Ok(()),
    }
}

/// Check if a series covers the full forecast window
pub fn is_complete_forecast_window(series: &[ForecastPoint]) -> bool {
    series.len() == FORECAST_WINDOW_DAYS
}
