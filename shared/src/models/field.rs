//! Field dashboard models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::forecast::{
    parse_forecast_series, series_dates, ForecastKind, ForecastPoint, ForecastPointPayload,
};
use super::sensor::{Sensor, SensorPayload};
use crate::error::PayloadShapeError;
use crate::types::{calendar_date, parse_calendar_date};
use crate::validation::{trim_to_axis, validate_chronological, validate_forecast_alignment};

/// Drill-down detail for a single field
///
/// Serializes with the upstream key names so the model can be handed back to
/// any consumer that binds by exact key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDashboard {
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "Altitude")]
    pub altitude: f64,
    #[serde(rename = "CurrentGDD")]
    pub current_gdd: Option<f64>,
    #[serde(rename = "OptimalGDD")]
    pub optimal_gdd: Option<f64>,
    #[serde(rename = "CuttingDateCalculated", with = "calendar_date::option")]
    pub cutting_date: Option<NaiveDate>,
    #[serde(rename = "FieldSensors")]
    pub sensors: Vec<Sensor>,
    #[serde(rename = "SevenDayTempForecast")]
    pub temperature_forecast: Vec<ForecastPoint>,
    #[serde(rename = "SevenDayGDDForecast")]
    pub gdd_forecast: Vec<ForecastPoint>,
    #[serde(rename = "SevenDayHumidityForecast")]
    pub humidity_forecast: Vec<ForecastPoint>,
}

/// Field dashboard as it arrives on the wire
///
/// Every key is optional here; [`FieldDashboard::try_from`] decides which
/// absences are acceptable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldDashboardPayload {
    #[serde(rename = "FieldName")]
    pub field_name: Option<String>,
    #[serde(rename = "Altitude")]
    pub altitude: Option<f64>,
    #[serde(rename = "CurrentGDD")]
    pub current_gdd: Option<f64>,
    #[serde(rename = "OptimalGDD")]
    pub optimal_gdd: Option<f64>,
    #[serde(rename = "CuttingDateCalculated")]
    pub cutting_date_calculated: Option<String>,
    #[serde(rename = "FieldSensors")]
    pub field_sensors: Option<Vec<SensorPayload>>,
    #[serde(rename = "SevenDayTempForecast")]
    pub seven_day_temp_forecast: Option<Vec<ForecastPointPayload>>,
    #[serde(rename = "SevenDayGDDForecast")]
    pub seven_day_gdd_forecast: Option<Vec<ForecastPointPayload>>,
    #[serde(rename = "SevenDayHumidityForecast")]
    pub seven_day_humidity_forecast: Option<Vec<ForecastPointPayload>>,
}

impl FieldDashboardPayload {
    /// Decode a JSON document without interpreting it
    pub fn from_json(json: &str) -> Result<Self, PayloadShapeError> {
        serde_json::from_str(json).map_err(|e| PayloadShapeError::Malformed(e.to_string()))
    }
}

impl TryFrom<FieldDashboardPayload> for FieldDashboard {
    type Error = PayloadShapeError;

    fn try_from(payload: FieldDashboardPayload) -> Result<Self, Self::Error> {
        let field_name = payload
            .field_name
            .ok_or(PayloadShapeError::MissingField("FieldName"))?;
        let altitude = payload
            .altitude
            .ok_or(PayloadShapeError::MissingField("Altitude"))?;

        let sensors = payload
            .field_sensors
            .ok_or(PayloadShapeError::MissingField("FieldSensors"))?
            .into_iter()
            .map(Sensor::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let temperature_forecast =
            parse_forecast_series(ForecastKind::Temperature, payload.seven_day_temp_forecast)?;
        let gdd_forecast = parse_forecast_series(ForecastKind::Gdd, payload.seven_day_gdd_forecast)?;
        let humidity_forecast =
            parse_forecast_series(ForecastKind::Humidity, payload.seven_day_humidity_forecast)?;

        validate_chronological(ForecastKind::Temperature, &temperature_forecast)?;

        // Upstream GDD rows run one day past the temperature window.
        let axis = series_dates(&temperature_forecast);
        let gdd_forecast = trim_forecast(ForecastKind::Gdd, &axis, gdd_forecast);
        let humidity_forecast = trim_forecast(ForecastKind::Humidity, &axis, humidity_forecast);

        let cutting_date = payload
            .cutting_date_calculated
            .map(|raw| {
                parse_calendar_date(&raw).ok_or(PayloadShapeError::InvalidDate {
                    field: "CuttingDateCalculated",
                    value: raw,
                })
            })
            .transpose()?;

        Ok(FieldDashboard {
            field_name,
            altitude,
            current_gdd: payload.current_gdd,
            optimal_gdd: payload.optimal_gdd,
            cutting_date,
            sensors,
            temperature_forecast,
            gdd_forecast,
            humidity_forecast,
        })
    }
}

fn trim_forecast(
    kind: ForecastKind,
    axis: &[NaiveDate],
    series: Vec<ForecastPoint>,
) -> Vec<ForecastPoint> {
    let (kept, dropped) = trim_to_axis(axis, series);
    if dropped > 0 {
        tracing::warn!(
            series = kind.wire_name(),
            dropped,
            "Dropped forecast points outside the temperature axis"
        );
    }
    kept
}

impl FieldDashboard {
    /// Decode and validate a JSON document in one step
    pub fn from_json(json: &str) -> Result<Self, PayloadShapeError> {
        FieldDashboardPayload::from_json(json)?.try_into()
    }

    /// Shared date axis of the three forecast series
    pub fn forecast_dates(&self) -> Vec<NaiveDate> {
        series_dates(&self.temperature_forecast)
    }

    pub fn has_sensors(&self) -> bool {
        !self.sensors.is_empty()
    }

    /// Whether GDD and humidity line up with the temperature axis point for
    /// point. Charts can only be drawn when they do.
    pub fn check_forecast_alignment(&self) -> Result<(), PayloadShapeError> {
        validate_forecast_alignment(
            &self.temperature_forecast,
            &self.gdd_forecast,
            &self.humidity_forecast,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SensorState;
    use serde_json::json;

    fn forecast(values: &[f64]) -> serde_json::Value {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| json!({ "date": format!("2024-06-{:02}T00:00:00", 10 + i), "value": v }))
            .collect()
    }

    fn sample_payload() -> serde_json::Value {
        json!({
            "FieldName": "North Meadow",
            "Altitude": 320,
            "CurrentGDD": 212.0,
            "OptimalGDD": 350.0,
            "CuttingDateCalculated": "2024-06-13T00:00:00",
            "FieldSensors": [{
                "SensorId": "s-1",
                "SerialNo": "SN-0001",
                "OptimalGDD": 350.0,
                "SensorResetDate": "2024-04-01T00:00:00",
                "State": "Active"
            }],
            "SevenDayTempForecast": forecast(&[25.0, 25.2, 25.4, 25.1, 24.9, 25.3, 25.6]),
            "SevenDayGDDForecast": forecast(&[212.0, 227.0, 242.0, 257.0, 271.0, 286.0, 301.0]),
            "SevenDayHumidityForecast": forecast(&[60.0, 62.0, 70.0, 75.0, 68.0, 55.0, 58.0])
        })
    }

    #[test]
    fn test_payload_rehydrates_into_typed_dashboard() {
        let dashboard = FieldDashboard::from_json(&sample_payload().to_string()).unwrap();

        assert_eq!(dashboard.field_name, "North Meadow");
        assert_eq!(dashboard.altitude, 320.0);
        assert_eq!(dashboard.cutting_date, NaiveDate::from_ymd_opt(2024, 6, 13));
        assert_eq!(dashboard.sensors.len(), 1);
        assert_eq!(dashboard.sensors[0].state, SensorState::Active);
        assert_eq!(dashboard.forecast_dates().len(), 7);
        assert!(dashboard.has_sensors());
    }

    #[test]
    fn test_missing_sensor_sequence_is_rejected() {
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove("FieldSensors");

        let err = FieldDashboard::from_json(&payload.to_string()).unwrap_err();
        assert_eq!(err, PayloadShapeError::MissingField("FieldSensors"));
    }

    #[test]
    fn test_null_forecast_sequence_is_rejected() {
        let mut payload = sample_payload();
        payload["SevenDayGDDForecast"] = serde_json::Value::Null;

        let err = FieldDashboard::from_json(&payload.to_string()).unwrap_err();
        assert_eq!(err, PayloadShapeError::MissingField("SevenDayGDDForecast"));
    }

    #[test]
    fn test_field_without_sensors_accepts_absent_gdd_figures() {
        let payload = json!({
            "FieldName": "Fallow",
            "Altitude": 120,
            "CurrentGDD": null,
            "OptimalGDD": null,
            "CuttingDateCalculated": null,
            "FieldSensors": [],
            "SevenDayTempForecast": [],
            "SevenDayGDDForecast": [],
            "SevenDayHumidityForecast": []
        });

        let dashboard = FieldDashboard::from_json(&payload.to_string()).unwrap();
        assert!(!dashboard.has_sensors());
        assert_eq!(dashboard.current_gdd, None);
        assert_eq!(dashboard.cutting_date, None);
    }

    #[test]
    fn test_longer_gdd_series_is_trimmed_to_temperature_axis() {
        let mut payload = sample_payload();
        payload["SevenDayGDDForecast"] =
            forecast(&[212.0, 227.0, 242.0, 257.0, 271.0, 286.0, 301.0, 316.0]);

        let dashboard = FieldDashboard::from_json(&payload.to_string()).unwrap();

        assert_eq!(dashboard.sensors.len(), 1);
        assert_eq!(dashboard.gdd_forecast.len(), 7);
        assert_eq!(series_dates(&dashboard.gdd_forecast), dashboard.forecast_dates());
        assert_eq!(dashboard.gdd_forecast[6].value, 301.0);
        assert!(dashboard.check_forecast_alignment().is_ok());
    }

    #[test]
    fn test_gap_in_humidity_keeps_dashboard_but_not_alignment() {
        let mut payload = sample_payload();
        payload["SevenDayHumidityForecast"]
            .as_array_mut()
            .unwrap()
            .remove(3);

        let dashboard = FieldDashboard::from_json(&payload.to_string()).unwrap();

        assert_eq!(dashboard.field_name, "North Meadow");
        assert_eq!(dashboard.cutting_date, NaiveDate::from_ymd_opt(2024, 6, 13));
        assert_eq!(dashboard.humidity_forecast.len(), 6);
        assert!(matches!(
            dashboard.check_forecast_alignment(),
            Err(PayloadShapeError::MisalignedSeries { series: "SevenDayHumidityForecast", .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = FieldDashboard::from_json("{ not json").unwrap_err();
        assert!(matches!(err, PayloadShapeError::Malformed(_)));
    }

    #[test]
    fn test_serializes_with_upstream_keys() {
        let dashboard = FieldDashboard::from_json(&sample_payload().to_string()).unwrap();
        let json = serde_json::to_value(&dashboard).unwrap();

        assert_eq!(json["CurrentGDD"], 212.0);
        assert_eq!(json["CuttingDateCalculated"], "2024-06-13");
        assert_eq!(json["SevenDayGDDForecast"][0]["date"], "2024-06-10");
        assert_eq!(json["FieldSensors"][0]["SerialNo"], "SN-0001");
    }
}
