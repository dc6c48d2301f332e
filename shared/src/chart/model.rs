//! Rendering-ready chart specifications
//!
//! These are plain data: a host renders them with whatever charting engine it
//! has. They are rebuilt from scratch whenever the dashboard changes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Left,
    Right,
}

/// A vertical value axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSpec {
    pub id: String,
    pub position: AxisPosition,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_max: Option<f64>,
    pub begin_at_zero: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStyle {
    pub border_color: String,
    pub background_color: String,
    pub border_width: f64,
    /// Bezier curve tension, 0 for straight segments
    pub tension: f64,
    pub show_points: bool,
}

/// One plotted series; `values` are positionally aligned with the chart labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSpec {
    pub label: String,
    pub values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_id: Option<String>,
    pub style: SeriesStyle,
}

impl SeriesSpec {
    /// A dataless series only registers a legend entry
    pub fn is_legend_only(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationLabel {
    pub content: String,
    pub position: String,
    pub background_color: String,
    pub color: String,
}

/// Vertical marker line at one category of the x axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationSpec {
    pub id: String,
    /// Category index the line is drawn at
    pub x_index: usize,
    /// Axis label at `x_index`
    pub x_label: String,
    pub border_color: String,
    pub border_width: f64,
    pub label: AnnotationLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<SeriesSpec>,
    pub axes: Vec<AxisSpec>,
    pub annotations: Vec<AnnotationSpec>,
    pub maintain_aspect_ratio: bool,
}

impl ChartSpec {
    pub fn series(&self, label: &str) -> Option<&SeriesSpec> {
        self.series.iter().find(|s| s.label == label)
    }

    pub fn axis(&self, id: &str) -> Option<&AxisSpec> {
        self.axes.iter().find(|a| a.id == id)
    }

    pub fn annotation(&self, id: &str) -> Option<&AnnotationSpec> {
        self.annotations.iter().find(|a| a.id == id)
    }
}

/// Both charts of a field dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastCharts {
    pub temperature_gdd: ChartSpec,
    pub humidity: ChartSpec,
}

/// Tunables for chart construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Moving-average window applied to the temperature series
    pub smoothing_window: usize,
    pub temperature_suggested_min: f64,
    pub temperature_suggested_max: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            smoothing_window: 3,
            temperature_suggested_min: 24.5,
            temperature_suggested_max: 26.0,
        }
    }
}
