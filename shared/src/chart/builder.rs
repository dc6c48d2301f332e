//! Forecast chart construction

use std::collections::HashSet;

use chrono::NaiveDate;

use super::model::{
    AnnotationLabel, AnnotationSpec, AxisPosition, AxisSpec, ChartKind, ChartSettings, ChartSpec,
    ForecastCharts, SeriesSpec, SeriesStyle,
};
use crate::cutting::is_within_forecast_window;
use crate::models::{series_values, FieldDashboard};
use crate::smoothing::moving_average;

pub const TEMPERATURE_AXIS_ID: &str = "y-temp";
pub const GDD_AXIS_ID: &str = "y-gdd";
pub const HUMIDITY_AXIS_ID: &str = "y";
pub const CUTTING_DATE_ANNOTATION_ID: &str = "cutting-date";

pub const TEMPERATURE_LABEL: &str = "Temperature (°C)";
pub const GDD_LABEL: &str = "Cumulative GDD";
pub const CUTTING_DATE_LABEL: &str = "Cutting Date";
pub const HUMIDITY_LABEL: &str = "Humidity (%)";

const CUTTING_DATE_COLOR: &str = "blue";
const CUTTING_DATE_FILL: &str = "rgba(0, 0, 255, 0.5)";

/// Builds the temperature/GDD and humidity charts of a field dashboard
#[derive(Debug, Clone, Default)]
pub struct ForecastChartBuilder {
    settings: ChartSettings,
}

impl ForecastChartBuilder {
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Build both charts over the dashboard's shared forecast axis
    pub fn build(&self, dashboard: &FieldDashboard) -> ForecastCharts {
        let dates = dashboard.forecast_dates();
        let labels = axis_labels(&dates);

        ForecastCharts {
            temperature_gdd: self.temperature_gdd_chart(dashboard, &dates, &labels),
            humidity: self.humidity_chart(dashboard, &labels),
        }
    }

    /// Dual-axis line chart: smoothed temperature (left), raw cumulative GDD
    /// (right), plus the cutting-date legend entry and marker.
    pub fn temperature_gdd_chart(
        &self,
        dashboard: &FieldDashboard,
        dates: &[NaiveDate],
        labels: &[String],
    ) -> ChartSpec {
        let temperature = moving_average(
            &series_values(&dashboard.temperature_forecast),
            self.settings.smoothing_window,
        );
        // Cumulative values must stay monotone, so GDD is never smoothed.
        let gdd = series_values(&dashboard.gdd_forecast);

        let series = vec![
            SeriesSpec {
                label: TEMPERATURE_LABEL.to_string(),
                values: temperature,
                axis_id: Some(TEMPERATURE_AXIS_ID.to_string()),
                style: SeriesStyle {
                    border_color: "red".to_string(),
                    background_color: "rgba(255, 99, 132, 0.2)".to_string(),
                    border_width: 3.0,
                    tension: 0.4,
                    show_points: true,
                },
            },
            SeriesSpec {
                label: GDD_LABEL.to_string(),
                values: gdd,
                axis_id: Some(GDD_AXIS_ID.to_string()),
                style: SeriesStyle {
                    border_color: "green".to_string(),
                    background_color: "rgba(75, 192, 192, 0.2)".to_string(),
                    border_width: 3.0,
                    tension: 0.0,
                    show_points: true,
                },
            },
            SeriesSpec {
                label: CUTTING_DATE_LABEL.to_string(),
                values: Vec::new(),
                axis_id: None,
                style: SeriesStyle {
                    border_color: CUTTING_DATE_COLOR.to_string(),
                    background_color: CUTTING_DATE_FILL.to_string(),
                    border_width: 2.0,
                    tension: 0.0,
                    show_points: false,
                },
            },
        ];

        let axes = vec![
            AxisSpec {
                id: TEMPERATURE_AXIS_ID.to_string(),
                position: AxisPosition::Left,
                title: TEMPERATURE_LABEL.to_string(),
                suggested_min: Some(self.settings.temperature_suggested_min),
                suggested_max: Some(self.settings.temperature_suggested_max),
                begin_at_zero: false,
            },
            AxisSpec {
                id: GDD_AXIS_ID.to_string(),
                position: AxisPosition::Right,
                title: GDD_LABEL.to_string(),
                suggested_min: None,
                suggested_max: None,
                begin_at_zero: false,
            },
        ];

        ChartSpec {
            kind: ChartKind::Line,
            labels: labels.to_vec(),
            series,
            axes,
            annotations: cutting_date_annotation(dashboard.cutting_date, dates, labels)
                .into_iter()
                .collect(),
            maintain_aspect_ratio: true,
        }
    }

    /// Single-axis bar chart of raw humidity, baseline at zero
    pub fn humidity_chart(&self, dashboard: &FieldDashboard, labels: &[String]) -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Bar,
            labels: labels.to_vec(),
            series: vec![SeriesSpec {
                label: HUMIDITY_LABEL.to_string(),
                values: series_values(&dashboard.humidity_forecast),
                axis_id: Some(HUMIDITY_AXIS_ID.to_string()),
                style: SeriesStyle {
                    border_color: "rgba(54, 162, 235, 1)".to_string(),
                    background_color: "rgba(54, 162, 235, 0.2)".to_string(),
                    border_width: 1.0,
                    tension: 0.0,
                    show_points: false,
                },
            }],
            axes: vec![AxisSpec {
                id: HUMIDITY_AXIS_ID.to_string(),
                position: AxisPosition::Left,
                title: HUMIDITY_LABEL.to_string(),
                suggested_min: None,
                suggested_max: None,
                begin_at_zero: true,
            }],
            annotations: Vec::new(),
            maintain_aspect_ratio: false,
        }
    }
}

/// X-axis labels for a forecast axis.
///
/// Short English weekday names (`Mon`, `Tue`, ...). If two dates would share a
/// label the day of month is appended to every label, and failing that the full
/// date, so each category stays distinct.
pub fn axis_labels(dates: &[NaiveDate]) -> Vec<String> {
    const FORMATS: [&str; 3] = ["%a", "%a %d", "%a %Y-%m-%d"];

    let mut labels = Vec::new();
    for format in FORMATS {
        labels = dates
            .iter()
            .map(|d| d.format(format).to_string())
            .collect::<Vec<_>>();
        let distinct: HashSet<&str> = labels.iter().map(String::as_str).collect();
        if distinct.len() == labels.len() {
            break;
        }
    }
    labels
}

/// Marker for the cutting date, only when it lies inside the forecast window.
///
/// Anchored by calendar date on the forecast day equal to the cutting date.
/// A cutting date that falls in a gap of the axis gets no marker.
pub fn cutting_date_annotation(
    cutting_date: Option<NaiveDate>,
    dates: &[NaiveDate],
    labels: &[String],
) -> Option<AnnotationSpec> {
    let cutting_date = cutting_date?;
    if !is_within_forecast_window(cutting_date, dates) {
        return None;
    }

    let x_index = dates.iter().position(|d| *d == cutting_date)?;
    let x_label = labels.get(x_index)?.clone();

    Some(AnnotationSpec {
        id: CUTTING_DATE_ANNOTATION_ID.to_string(),
        x_index,
        x_label,
        border_color: CUTTING_DATE_COLOR.to_string(),
        border_width: 2.0,
        label: AnnotationLabel {
            content: CUTTING_DATE_LABEL.to_string(),
            position: "end".to_string(),
            background_color: CUTTING_DATE_FILL.to_string(),
            color: "white".to_string(),
        },
    })
}
