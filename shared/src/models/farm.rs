//! Farm overview models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{calendar_date, FarmId, FieldId};

/// Read-only summary of one farm and its fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmDashboard {
    #[serde(rename = "FarmId")]
    pub farm_id: FarmId,
    #[serde(rename = "FarmName")]
    pub farm_name: String,
    #[serde(rename = "FarmFields", default)]
    pub fields: Vec<FieldSummary>,
}

/// Per-field line of the farm overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    #[serde(rename = "FieldId")]
    pub field_id: FieldId,
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "CurrentGDD")]
    pub current_gdd: f64,
    #[serde(rename = "OptimalCuttingDate", with = "calendar_date::option", default)]
    pub optimal_cutting_date: Option<NaiveDate>,
}

/// Latest accumulated GDD and projected cutting date of one sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub gdd: f64,
    pub cutting_date: Option<NaiveDate>,
}

impl FieldSummary {
    /// Summarize a field from its sensors' readings.
    ///
    /// Current GDD is the mean sensor GDD rounded up (0 without sensors); the
    /// optimal cutting date is the earliest one any sensor projects.
    pub fn from_sensor_readings(
        field_id: FieldId,
        field_name: impl Into<String>,
        readings: &[SensorReading],
    ) -> Self {
        let current_gdd = if readings.is_empty() {
            0.0
        } else {
            let total: f64 = readings.iter().map(|r| r.gdd).sum();
            (total / readings.len() as f64).ceil()
        };

        Self {
            field_id,
            field_name: field_name.into(),
            current_gdd,
            optimal_cutting_date: readings.iter().filter_map(|r| r.cutting_date).min(),
        }
    }
}

impl FarmDashboard {
    pub fn field(&self, field_id: &FieldId) -> Option<&FieldSummary> {
        self.fields.iter().find(|f| &f.field_id == field_id)
    }
}
