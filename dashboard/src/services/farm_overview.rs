//! Farm overview session
//!
//! Lists every farm with its fields' GDD and cutting status, and creates farms
//! and fields.

use chrono::NaiveDate;
use serde::Serialize;
use shared::{
    calendar_date, CreateFarmRequest, CuttingStatus, FarmDashboard, FarmId, FieldDraft, FieldId,
    FieldSummary,
};
use tokio::sync::watch;
use validator::Validate;

use super::phase::{PhaseTracker, SessionPhase};
use super::RefreshPolicy;
use crate::error::{DashboardError, DashboardResult, ErrorDetail};
use crate::external::DashboardApi;

/// One line of the selected farm's field table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRow {
    pub field_id: FieldId,
    pub field_name: String,
    pub current_gdd: f64,
    #[serde(with = "calendar_date::option")]
    pub optimal_cutting_date: Option<NaiveDate>,
    pub cutting_status: CuttingStatus,
    pub status_message: String,
}

impl FieldRow {
    pub fn from_summary(summary: &FieldSummary, today: NaiveDate) -> Self {
        let cutting_status = CuttingStatus::evaluate(summary.optimal_cutting_date, today);
        Self {
            field_id: summary.field_id.clone(),
            field_name: summary.field_name.clone(),
            current_gdd: summary.current_gdd,
            optimal_cutting_date: summary.optimal_cutting_date,
            status_message: cutting_status.message(),
            cutting_status,
        }
    }
}

pub struct FarmOverviewSession<A> {
    api: A,
    refresh_policy: RefreshPolicy,
    phase: PhaseTracker,
    farms: Vec<FarmDashboard>,
    selected: Option<FarmId>,
    last_error: Option<ErrorDetail>,
}

impl<A: DashboardApi> FarmOverviewSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            refresh_policy: RefreshPolicy::default(),
            phase: PhaseTracker::new(),
            farms: Vec::new(),
            selected: None,
            last_error: None,
        }
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

    pub fn farms(&self) -> &[FarmDashboard] {
        &self.farms
    }

    pub fn last_error(&self) -> Option<&ErrorDetail> {
        self.last_error.as_ref()
    }

    pub fn selected_farm(&self) -> Option<&FarmDashboard> {
        let selected = self.selected.as_ref()?;
        self.farms.iter().find(|farm| &farm.farm_id == selected)
    }

    /// Fetch every farm dashboard.
    ///
    /// The current selection survives if that farm is still listed; otherwise
    /// the first farm is selected.
    #[tracing::instrument(skip(self))]
    pub async fn load(&mut self) -> DashboardResult<&[FarmDashboard]> {
        self.phase.set(SessionPhase::Loading);

        let farms = match self.api.farm_dashboards().await {
            Ok(farms) => farms,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load farm dashboards");
                return Err(self.fail(DashboardError::FetchFailure(e)));
            }
        };

        let keep_selection = self
            .selected
            .as_ref()
            .is_some_and(|id| farms.iter().any(|farm| &farm.farm_id == id));
        if !keep_selection {
            self.selected = farms.first().map(|farm| farm.farm_id.clone());
        }

        tracing::info!(farms = farms.len(), selected = ?self.selected, "Farm dashboards loaded");
        self.farms = farms;
        self.last_error = None;
        self.phase.set(SessionPhase::Ready);

        Ok(&self.farms)
    }

    pub fn select_farm(&mut self, farm_id: &FarmId) -> DashboardResult<&FarmDashboard> {
        if !self.farms.iter().any(|farm| &farm.farm_id == farm_id) {
            return Err(self.reject(DashboardError::MissingSelection("farm")));
        }
        self.selected = Some(farm_id.clone());
        self.selected_farm()
            .ok_or(DashboardError::MissingSelection("farm"))
    }

    /// Rows for the selected farm's fields, evaluated against `today`
    pub fn field_rows(&self, today: NaiveDate) -> Vec<FieldRow> {
        self.selected_farm()
            .map(|farm| {
                farm.fields
                    .iter()
                    .map(|summary| FieldRow::from_summary(summary, today))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[tracing::instrument(skip_all, fields(farm_name = %request.farm_name))]
    pub async fn create_farm(
        &mut self,
        request: CreateFarmRequest,
    ) -> DashboardResult<&[FarmDashboard]> {
        if let Err(errors) = request.validate() {
            return Err(self.reject(DashboardError::ValidationFailure(errors)));
        }

        self.phase.set(SessionPhase::Loading);
        if let Err(e) = self.api.create_farm(&request).await {
            tracing::error!(error = %e, "Failed to create farm");
            return Err(self.fail(DashboardError::MutationFailure(e)));
        }

        tracing::info!("Farm created");
        self.refresh().await
    }

    /// Create a field on the selected farm
    #[tracing::instrument(skip_all, fields(field_name = %draft.name))]
    pub async fn create_field(&mut self, draft: FieldDraft) -> DashboardResult<&[FarmDashboard]> {
        let farm_id = match self.selected.clone() {
            Some(farm_id) => farm_id,
            None => return Err(self.reject(DashboardError::MissingSelection("farm"))),
        };
        if let Err(errors) = draft.validate() {
            return Err(self.reject(DashboardError::ValidationFailure(errors)));
        }

        self.phase.set(SessionPhase::Loading);
        let request = draft.into_request(farm_id);
        if let Err(e) = self.api.create_field(&request).await {
            tracing::error!(error = %e, farm_id = %request.farm_id, "Failed to create field");
            return Err(self.fail(DashboardError::MutationFailure(e)));
        }

        tracing::info!(farm_id = %request.farm_id, "Field created");
        self.refresh().await
    }

    async fn refresh(&mut self) -> DashboardResult<&[FarmDashboard]> {
        match self.refresh_policy {
            RefreshPolicy::FullReload => self.load().await,
        }
    }

    fn fail(&mut self, error: DashboardError) -> DashboardError {
        self.last_error = Some(ErrorDetail::from(&error));
        self.phase.set(SessionPhase::Error);
        error
    }

    fn reject(&mut self, error: DashboardError) -> DashboardError {
        tracing::warn!(code = error.code(), "{}", error);
        self.last_error = Some(ErrorDetail::from(&error));
        error
    }
}
