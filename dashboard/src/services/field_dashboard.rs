//! Field dashboard session
//!
//! Fetches one field's dashboard, derives the cutting status and the forecast
//! charts, and re-fetches everything after a sensor is created or reset.

use chrono::NaiveDate;
use serde::Serialize;
use shared::{
    is_complete_forecast_window, ChartSettings, CuttingStatus, FieldDashboard, FieldId,
    ForecastChartBuilder, ForecastCharts, SensorDraft, SensorId, UpdateSensorResetDateRequest,
};
use tokio::sync::watch;
use validator::Validate;

use super::phase::{PhaseTracker, SessionPhase};
use super::RefreshPolicy;
use crate::clock::Clock;
use crate::error::{invalid_fields, DashboardError, DashboardResult, ErrorDetail};
use crate::external::DashboardApi;
use crate::render::{ChartHandle, ChartSurface, ChartTarget, RenderError};

/// Renderable view-model of one field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub field_id: FieldId,
    pub dashboard: FieldDashboard,
    pub cutting_status: CuttingStatus,
    pub status_message: String,
    /// `None` when the field has no sensors, its forecast series do not line
    /// up, or the charts could not be mounted
    pub charts: Option<ForecastCharts>,
}

/// Sensor creation dialog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorDialog {
    pub open: bool,
    pub draft: SensorDraft,
    /// Draft fields that failed validation on the last submit
    pub invalid_fields: Vec<String>,
}

/// Reset-date dialog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResetDateDialog {
    pub open: bool,
    pub sensor_id: Option<SensorId>,
    pub new_date: Option<NaiveDate>,
}

pub struct FieldDashboardSession<A, S, C> {
    api: A,
    surface: S,
    clock: C,
    builder: ForecastChartBuilder,
    refresh_policy: RefreshPolicy,
    phase: PhaseTracker,
    field_id: Option<FieldId>,
    view: Option<FieldView>,
    charts: Vec<ChartHandle>,
    last_error: Option<ErrorDetail>,
    sensor_dialog: SensorDialog,
    reset_date_dialog: ResetDateDialog,
}

impl<A, S, C> FieldDashboardSession<A, S, C>
where
    A: DashboardApi,
    S: ChartSurface,
    C: Clock,
{
    pub fn new(api: A, surface: S, clock: C) -> Self {
        Self {
            api,
            surface,
            clock,
            builder: ForecastChartBuilder::default(),
            refresh_policy: RefreshPolicy::default(),
            phase: PhaseTracker::new(),
            field_id: None,
            view: None,
            charts: Vec::new(),
            last_error: None,
            sensor_dialog: SensorDialog::default(),
            reset_date_dialog: ResetDateDialog::default(),
        }
    }

    pub fn with_chart_settings(mut self, settings: ChartSettings) -> Self {
        self.builder = ForecastChartBuilder::new(settings);
        self
    }

    pub fn with_refresh_policy(mut self, policy: RefreshPolicy) -> Self {
        self.refresh_policy = policy;
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.phase.subscribe()
    }

    pub fn view(&self) -> Option<&FieldView> {
        self.view.as_ref()
    }

    /// Field of the last successful load
    pub fn field_id(&self) -> Option<&FieldId> {
        self.field_id.as_ref()
    }

    pub fn last_error(&self) -> Option<&ErrorDetail> {
        self.last_error.as_ref()
    }

    pub fn sensor_dialog(&self) -> &SensorDialog {
        &self.sensor_dialog
    }

    pub fn reset_date_dialog(&self) -> &ResetDateDialog {
        &self.reset_date_dialog
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Fetch `field_id` and rebuild the whole view-model.
    ///
    /// On failure the previous view-model, if any, is left untouched.
    #[tracing::instrument(skip_all, fields(field_id = %field_id))]
    pub async fn load(&mut self, field_id: FieldId) -> DashboardResult<&FieldView> {
        self.phase.set(SessionPhase::Loading);

        let dashboard = match self.api.field_dashboard(&field_id).await {
            Ok(dashboard) => dashboard,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load field dashboard");
                return Err(self.fail(DashboardError::FetchFailure(e)));
            }
        };

        tracing::info!(
            sensors = dashboard.sensors.len(),
            cutting_date = ?dashboard.cutting_date,
            "Field dashboard loaded"
        );

        let view = self.present(field_id.clone(), dashboard);
        self.field_id = Some(field_id);
        self.last_error = None;
        self.phase.set(SessionPhase::Ready);

        Ok(self.view.insert(view))
    }

    /// Validate `draft`, create the sensor on `field_id`, then refresh.
    ///
    /// An invalid draft is rejected before any request is made and its
    /// failing fields are recorded on the sensor dialog.
    #[tracing::instrument(skip_all, fields(field_id = %field_id))]
    pub async fn create_sensor(
        &mut self,
        field_id: FieldId,
        draft: SensorDraft,
    ) -> DashboardResult<&FieldView> {
        if let Err(errors) = draft.validate() {
            self.sensor_dialog.invalid_fields = invalid_fields(&errors);
            self.sensor_dialog.draft = draft;
            return Err(self.reject(DashboardError::ValidationFailure(errors)));
        }
        self.sensor_dialog.invalid_fields.clear();

        self.phase.set(SessionPhase::Loading);
        let request = draft.clone().into_request(field_id.clone());

        if let Err(e) = self.api.create_sensor(&request).await {
            tracing::error!(error = %e, "Failed to create sensor");
            self.sensor_dialog.draft = draft;
            return Err(self.fail(DashboardError::MutationFailure(e)));
        }

        tracing::info!(serial_no = %request.serial_no, "Sensor created");
        self.sensor_dialog = SensorDialog::default();
        self.refresh(field_id).await
    }

    /// Submit the sensor dialog's draft for the loaded field
    pub async fn submit_sensor_dialog(&mut self) -> DashboardResult<&FieldView> {
        let field_id = match self.field_id.clone() {
            Some(field_id) => field_id,
            None => return Err(self.reject(DashboardError::MissingSelection("field"))),
        };
        let draft = self.sensor_dialog.draft.clone();
        self.create_sensor(field_id, draft).await
    }

    /// Move the selected sensor's reset date to the chosen date, then refresh
    #[tracing::instrument(skip(self))]
    pub async fn update_sensor_reset_date(&mut self) -> DashboardResult<&FieldView> {
        let selection = (
            self.reset_date_dialog.sensor_id.clone(),
            self.reset_date_dialog.new_date,
            self.field_id.clone(),
        );
        let (sensor_id, new_reset_date, field_id) = match selection {
            (None, _, _) => return Err(self.reject(DashboardError::MissingSelection("sensor"))),
            (_, None, _) => return Err(self.reject(DashboardError::MissingSelection("reset date"))),
            (_, _, None) => return Err(self.reject(DashboardError::MissingSelection("field"))),
            (Some(sensor_id), Some(date), Some(field_id)) => (sensor_id, date, field_id),
        };

        self.phase.set(SessionPhase::Loading);
        let request = UpdateSensorResetDateRequest {
            sensor_id,
            new_reset_date,
        };

        if let Err(e) = self.api.update_sensor_reset_date(&request).await {
            tracing::error!(error = %e, sensor_id = %request.sensor_id, "Failed to update reset date");
            return Err(self.fail(DashboardError::MutationFailure(e)));
        }

        tracing::info!(
            sensor_id = %request.sensor_id,
            new_reset_date = %request.new_reset_date,
            "Sensor reset date updated"
        );
        self.reset_date_dialog = ResetDateDialog::default();
        self.refresh(field_id).await
    }

    pub fn open_sensor_dialog(&mut self) {
        self.sensor_dialog.open = true;
    }

    /// Close the sensor dialog and discard its draft
    pub fn close_sensor_dialog(&mut self) {
        self.sensor_dialog = SensorDialog::default();
    }

    pub fn set_sensor_draft(&mut self, draft: SensorDraft) {
        self.sensor_dialog.draft = draft;
    }

    /// Select `sensor_id` for a reset; any previously chosen date is cleared
    pub fn open_reset_date_dialog(&mut self, sensor_id: SensorId) {
        self.reset_date_dialog = ResetDateDialog {
            open: true,
            sensor_id: Some(sensor_id),
            new_date: None,
        };
    }

    pub fn choose_reset_date(&mut self, date: NaiveDate) {
        self.reset_date_dialog.new_date = Some(date);
    }

    pub fn close_reset_date_dialog(&mut self) {
        self.reset_date_dialog = ResetDateDialog::default();
    }

    /// Release every chart this session holds
    pub fn release_charts(&mut self) {
        for handle in self.charts.drain(..) {
            let id = handle.id;
            match self.surface.release(handle) {
                Ok(()) => tracing::debug!(chart_id = id, "Chart released"),
                Err(e) => tracing::warn!(chart_id = id, error = %e, "Failed to release chart"),
            }
        }
    }

    async fn refresh(&mut self, field_id: FieldId) -> DashboardResult<&FieldView> {
        match self.refresh_policy {
            RefreshPolicy::FullReload => self.load(field_id).await,
        }
    }

    fn present(&mut self, field_id: FieldId, dashboard: FieldDashboard) -> FieldView {
        let cutting_status = CuttingStatus::evaluate(dashboard.cutting_date, self.clock.today());

        if !is_complete_forecast_window(&dashboard.temperature_forecast) {
            tracing::warn!(
                points = dashboard.temperature_forecast.len(),
                "Forecast does not cover a full window"
            );
        }

        self.release_charts();

        let charts = if !dashboard.has_sensors() {
            tracing::warn!("Field has no sensors, rendering without charts");
            None
        } else if let Err(e) = dashboard.check_forecast_alignment() {
            tracing::warn!(error = %e, "Forecast series do not share one axis, rendering without charts");
            None
        } else {
            let charts = self.builder.build(&dashboard);
            match self.mount_charts(&charts) {
                Ok(()) => Some(charts),
                Err(e) => {
                    tracing::warn!(error = %e, "Charts could not be mounted");
                    self.release_charts();
                    None
                }
            }
        };

        FieldView {
            field_id,
            status_message: cutting_status.message(),
            cutting_status,
            dashboard,
            charts,
        }
    }

    fn mount_charts(&mut self, charts: &ForecastCharts) -> Result<(), RenderError> {
        for target in ChartTarget::ALL {
            let spec = match target {
                ChartTarget::TemperatureGdd => &charts.temperature_gdd,
                ChartTarget::Humidity => &charts.humidity,
            };
            let handle = self.surface.mount(target, spec)?;
            tracing::debug!(chart_id = handle.id, target = target.element_id(), "Chart mounted");
            self.charts.push(handle);
        }
        Ok(())
    }

    /// Record a fetch or mutation failure and enter the error phase
    fn fail(&mut self, error: DashboardError) -> DashboardError {
        self.last_error = Some(ErrorDetail::from(&error));
        self.phase.set(SessionPhase::Error);
        error
    }

    /// Record a locally rejected operation; the phase is unchanged
    fn reject(&mut self, error: DashboardError) -> DashboardError {
        tracing::warn!(code = error.code(), "{}", error);
        self.last_error = Some(ErrorDetail::from(&error));
        error
    }
}
