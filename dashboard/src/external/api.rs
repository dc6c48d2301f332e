//! Contract with the upstream dashboard data source

use async_trait::async_trait;
use shared::{
    CreateFarmRequest, CreateFieldRequest, CreateSensorRequest, FarmDashboard, FieldDashboard,
    FieldId, UpdateSensorResetDateRequest,
};

use crate::error::ApiError;

/// Everything a dashboard session reads from or writes to upstream.
///
/// Reads return validated models; writes are opaque success/failure.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn field_dashboard(&self, field_id: &FieldId) -> Result<FieldDashboard, ApiError>;

    async fn farm_dashboards(&self) -> Result<Vec<FarmDashboard>, ApiError>;

    async fn create_sensor(&self, request: &CreateSensorRequest) -> Result<(), ApiError>;

    async fn update_sensor_reset_date(
        &self,
        request: &UpdateSensorResetDateRequest,
    ) -> Result<(), ApiError>;

    async fn create_farm(&self, request: &CreateFarmRequest) -> Result<(), ApiError>;

    async fn create_field(&self, request: &CreateFieldRequest) -> Result<(), ApiError>;
}
