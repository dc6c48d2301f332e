//! Mutation payloads sent to the upstream data source

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{calendar_date, FarmId, FieldId, SensorId};

/// Sensor creation form, before it is bound to a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SensorDraft {
    #[serde(rename = "SerialNo")]
    #[validate(length(min = 1, max = 64, message = "Serial number is required"))]
    pub serial_no: String,

    #[serde(rename = "OptimalGDD")]
    #[validate(range(min = 1, message = "Optimal GDD must be positive"))]
    pub optimal_gdd: u32,

    #[serde(rename = "Long")]
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub longitude: f64,

    #[serde(rename = "Lat")]
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub latitude: f64,
}

impl Default for SensorDraft {
    fn default() -> Self {
        Self {
            serial_no: String::new(),
            optimal_gdd: 0,
            longitude: 0.0,
            latitude: 0.0,
        }
    }
}

impl SensorDraft {
    pub fn into_request(self, field_id: FieldId) -> CreateSensorRequest {
        CreateSensorRequest {
            field_id,
            serial_no: self.serial_no,
            optimal_gdd: self.optimal_gdd,
            longitude: self.longitude,
            latitude: self.latitude,
        }
    }
}

/// `POST` body creating a sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSensorRequest {
    #[serde(rename = "FieldId")]
    pub field_id: FieldId,
    #[serde(rename = "SerialNo")]
    pub serial_no: String,
    #[serde(rename = "OptimalGDD")]
    pub optimal_gdd: u32,
    #[serde(rename = "Long")]
    pub longitude: f64,
    #[serde(rename = "Lat")]
    pub latitude: f64,
}

/// `PUT` body moving a sensor's GDD reset date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSensorResetDateRequest {
    #[serde(rename = "SensorId")]
    pub sensor_id: SensorId,
    #[serde(rename = "NewResetDate", with = "calendar_date")]
    pub new_reset_date: NaiveDate,
}

/// `POST` body creating a farm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFarmRequest {
    #[validate(length(min = 1, max = 128, message = "Farm name is required"))]
    pub farm_name: String,
    #[validate(length(min = 1, max = 16, message = "Postcode is required"))]
    pub postcode: String,
    #[validate(length(min = 1, max = 128, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, max = 128, message = "Country is required"))]
    pub country: String,
}

/// Field creation form, before it is bound to a farm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FieldDraft {
    #[serde(rename = "Name")]
    #[validate(length(min = 1, max = 128, message = "Field name is required"))]
    pub name: String,

    /// Metres above sea level
    #[serde(rename = "Altitude")]
    #[validate(range(min = -500, max = 9000, message = "Altitude out of range"))]
    pub altitude: i32,
}

impl FieldDraft {
    pub fn into_request(self, farm_id: FarmId) -> CreateFieldRequest {
        CreateFieldRequest {
            name: self.name,
            altitude: self.altitude,
            farm_id,
        }
    }
}

/// `POST` body creating a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFieldRequest {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Altitude")]
    pub altitude: i32,
    #[serde(rename = "FarmId")]
    pub farm_id: FarmId,
}
