//! Shared fixtures for dashboard session tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use gdd_dashboard::error::ApiError;
use gdd_dashboard::external::DashboardApi;
use gdd_dashboard::services::SessionPhase;
use shared::{
    CreateFarmRequest, CreateFieldRequest, CreateSensorRequest, FarmDashboard, FarmId,
    FieldDashboard, FieldId, FieldSummary, ForecastPoint, Sensor, SensorId, SensorState,
    UpdateSensorResetDateRequest,
};
use tokio::sync::watch;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// First forecast day of every fixture (a Monday)
pub fn forecast_start() -> NaiveDate {
    date(2024, 6, 10)
}

/// Seven daily points starting at [`forecast_start`]
pub fn week(values: [f64; 7]) -> Vec<ForecastPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| ForecastPoint::new(forecast_start() + Duration::days(i as i64), *v))
        .collect()
}

pub fn sensor(id: &str) -> Sensor {
    Sensor {
        sensor_id: SensorId::new(id),
        serial_no: format!("SN-{}", id),
        optimal_gdd: 350.0,
        reset_date: Some(date(2024, 4, 1)),
        state: SensorState::Active,
    }
}

pub fn field_dashboard(cutting_date: Option<NaiveDate>, sensors: usize) -> FieldDashboard {
    FieldDashboard {
        field_name: "North Meadow".into(),
        altitude: 320.0,
        current_gdd: Some(212.0),
        optimal_gdd: Some(350.0),
        cutting_date,
        sensors: (1..=sensors).map(|i| sensor(&format!("s-{}", i))).collect(),
        temperature_forecast: week([25.0, 25.3, 25.6, 25.0, 24.7, 25.1, 25.4]),
        gdd_forecast: week([212.0, 227.0, 242.0, 257.0, 271.0, 286.0, 301.0]),
        humidity_forecast: week([60.0, 62.0, 70.0, 75.0, 68.0, 55.0, 58.0]),
    }
}

pub fn farm(id: &str, name: &str, fields: &[(&str, f64, Option<NaiveDate>)]) -> FarmDashboard {
    FarmDashboard {
        farm_id: FarmId::new(id),
        farm_name: name.into(),
        fields: fields
            .iter()
            .map(|(field_id, gdd, cutting)| FieldSummary {
                field_id: FieldId::new(*field_id),
                field_name: format!("Field {}", field_id),
                current_gdd: *gdd,
                optimal_cutting_date: *cutting,
            })
            .collect(),
    }
}

#[derive(Default)]
struct FakeState {
    fields: HashMap<FieldId, FieldDashboard>,
    farms: Vec<FarmDashboard>,
    fail_fetch: bool,
    fail_mutations: bool,
    calls: Vec<String>,
    phases_seen: Vec<SessionPhase>,
    observer: Option<watch::Receiver<SessionPhase>>,
    next_id: u32,
}

/// In-memory upstream that applies mutations to its own records, so a reload
/// reflects them
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(self, field_id: &str, dashboard: FieldDashboard) -> Self {
        self.state
            .lock()
            .unwrap()
            .fields
            .insert(FieldId::new(field_id), dashboard);
        self
    }

    pub fn with_farms(self, farms: Vec<FarmDashboard>) -> Self {
        self.set_farms(farms);
        self
    }

    pub fn set_farms(&self, farms: Vec<FarmDashboard>) {
        self.state.lock().unwrap().farms = farms;
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.state.lock().unwrap().fail_fetch = fail;
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.state.lock().unwrap().fail_mutations = fail;
    }

    /// Record the session phase at the moment each call arrives
    pub fn observe(&self, rx: watch::Receiver<SessionPhase>) {
        self.state.lock().unwrap().observer = Some(rx);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn phases_seen(&self) -> Vec<SessionPhase> {
        self.state.lock().unwrap().phases_seen.clone()
    }

    fn record(&self, call: &str) -> std::sync::MutexGuard<'_, FakeState> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.to_string());
        let phase = state.observer.as_ref().map(|rx| *rx.borrow());
        if let Some(phase) = phase {
            state.phases_seen.push(phase);
        }
        state
    }

    fn rejected() -> ApiError {
        ApiError::Status {
            status: 500,
            body: "upstream unavailable".into(),
        }
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn field_dashboard(&self, field_id: &FieldId) -> Result<FieldDashboard, ApiError> {
        let state = self.record("field_dashboard");
        if state.fail_fetch {
            return Err(Self::rejected());
        }
        state.fields.get(field_id).cloned().ok_or(ApiError::Status {
            status: 404,
            body: format!("unknown field {}", field_id),
        })
    }

    async fn farm_dashboards(&self) -> Result<Vec<FarmDashboard>, ApiError> {
        let state = self.record("farm_dashboards");
        if state.fail_fetch {
            return Err(Self::rejected());
        }
        Ok(state.farms.clone())
    }

    async fn create_sensor(&self, request: &CreateSensorRequest) -> Result<(), ApiError> {
        let mut state = self.record("create_sensor");
        if state.fail_mutations {
            return Err(Self::rejected());
        }
        state.next_id += 1;
        let sensor_id = SensorId::new(format!("new-{}", state.next_id));
        let field = state
            .fields
            .get_mut(&request.field_id)
            .ok_or(ApiError::Status {
                status: 404,
                body: String::new(),
            })?;
        field.sensors.push(Sensor {
            sensor_id,
            serial_no: request.serial_no.clone(),
            optimal_gdd: request.optimal_gdd as f64,
            reset_date: None,
            state: SensorState::Active,
        });
        Ok(())
    }

    async fn update_sensor_reset_date(
        &self,
        request: &UpdateSensorResetDateRequest,
    ) -> Result<(), ApiError> {
        let mut state = self.record("update_sensor_reset_date");
        if state.fail_mutations {
            return Err(Self::rejected());
        }
        let sensor = state
            .fields
            .values_mut()
            .flat_map(|field| field.sensors.iter_mut())
            .find(|sensor| sensor.sensor_id == request.sensor_id)
            .ok_or(ApiError::Status {
                status: 404,
                body: String::new(),
            })?;
        sensor.reset_date = Some(request.new_reset_date);
        Ok(())
    }

    async fn create_farm(&self, request: &CreateFarmRequest) -> Result<(), ApiError> {
        let mut state = self.record("create_farm");
        if state.fail_mutations {
            return Err(Self::rejected());
        }
        state.next_id += 1;
        let farm_id = FarmId::new(format!("farm-{}", state.next_id));
        state.farms.push(FarmDashboard {
            farm_id,
            farm_name: request.farm_name.clone(),
            fields: Vec::new(),
        });
        Ok(())
    }

    async fn create_field(&self, request: &CreateFieldRequest) -> Result<(), ApiError> {
        let mut state = self.record("create_field");
        if state.fail_mutations {
            return Err(Self::rejected());
        }
        state.next_id += 1;
        let field_id = FieldId::new(format!("field-{}", state.next_id));
        let farm = state
            .farms
            .iter_mut()
            .find(|farm| farm.farm_id == request.farm_id)
            .ok_or(ApiError::Status {
                status: 404,
                body: String::new(),
            })?;
        farm.fields
            .push(FieldSummary::from_sensor_readings(field_id, request.name.clone(), &[]));
        Ok(())
    }
}
