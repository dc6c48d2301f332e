//! Field sensor models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PayloadShapeError;
use crate::types::{calendar_date, parse_calendar_date, SensorId};

/// A GDD sensor installed in a field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sensor {
    #[serde(rename = "SensorId")]
    pub sensor_id: SensorId,
    #[serde(rename = "SerialNo")]
    pub serial_no: String,
    #[serde(rename = "OptimalGDD")]
    pub optimal_gdd: f64,
    /// Date from which GDD accumulation is counted
    #[serde(rename = "SensorResetDate", with = "calendar_date::option")]
    pub reset_date: Option<NaiveDate>,
    #[serde(rename = "State")]
    pub state: SensorState,
}

/// Sensor state as published by the upstream source
///
/// Unknown values are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SensorState {
    Active,
    Inactive,
    Maintenance,
    Other(String),
}

impl From<String> for SensorState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Active" => SensorState::Active,
            "Inactive" => SensorState::Inactive,
            "Maintenance" => SensorState::Maintenance,
            _ => SensorState::Other(value),
        }
    }
}

impl From<SensorState> for String {
    fn from(state: SensorState) -> Self {
        state.to_string()
    }
}

impl std::fmt::Display for SensorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorState::Active => write!(f, "Active"),
            SensorState::Inactive => write!(f, "Inactive"),
            SensorState::Maintenance => write!(f, "Maintenance"),
            SensorState::Other(value) => write!(f, "{}", value),
        }
    }
}

/// Sensor as it arrives on the wire
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensorPayload {
    #[serde(rename = "SensorId")]
    pub sensor_id: Option<String>,
    #[serde(rename = "SerialNo")]
    pub serial_no: Option<String>,
    #[serde(rename = "OptimalGDD")]
    pub optimal_gdd: Option<f64>,
    #[serde(rename = "SensorResetDate")]
    pub sensor_reset_date: Option<String>,
    #[serde(rename = "State")]
    pub state: Option<String>,
}

impl TryFrom<SensorPayload> for Sensor {
    type Error = PayloadShapeError;

    fn try_from(payload: SensorPayload) -> Result<Self, Self::Error> {
        let sensor_id = payload
            .sensor_id
            .ok_or(PayloadShapeError::MissingField("FieldSensors[].SensorId"))?;
        let serial_no = payload
            .serial_no
            .ok_or(PayloadShapeError::MissingField("FieldSensors[].SerialNo"))?;
        let optimal_gdd = payload
            .optimal_gdd
            .ok_or(PayloadShapeError::MissingField("FieldSensors[].OptimalGDD"))?;

        let state = payload
            .state
            .ok_or(PayloadShapeError::MissingField("FieldSensors[].State"))?;

        let reset_date = payload
            .sensor_reset_date
            .map(|raw| {
                parse_calendar_date(&raw).ok_or(PayloadShapeError::InvalidDate {
                    field: "FieldSensors[].SensorResetDate",
                    value: raw,
                })
            })
            .transpose()?;

        Ok(Sensor {
            sensor_id: SensorId::new(sensor_id),
            serial_no,
            optimal_gdd,
            reset_date,
            state: SensorState::from(state),
        })
    }
}
