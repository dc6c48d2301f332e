//! HTTP client for the upstream dashboard API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    CreateFarmRequest, CreateFieldRequest, CreateSensorRequest, FarmDashboard, FieldDashboard,
    FieldDashboardPayload, FieldId, UpdateSensorResetDateRequest,
};

use super::api::DashboardApi;
use super::auth::{StaticToken, TokenSource};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// Dashboard API client over HTTP
#[derive(Clone)]
pub struct HttpDashboardApi<T = StaticToken> {
    client: Client,
    base_url: String,
    tokens: T,
}

impl HttpDashboardApi<StaticToken> {
    /// Build a client from configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(
            config.base_url.clone(),
            StaticToken::from(config.bearer_token.clone()),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

impl<T: TokenSource> HttpDashboardApi<T> {
    pub fn new(base_url: impl Into<String>, tokens: T, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn field_dashboard_url(&self, field_id: &FieldId) -> String {
        // Upstream route has no separator before the id
        self.url(&format!("/fields/fielddashboard{}", field_id))
    }

    /// Attach the bearer token, send, and reject non-2xx responses
    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match self.tokens.bearer_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Dashboard API error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn get_json<R: DeserializeOwned>(&self, url: String) -> Result<R, ApiError> {
        let response = self.execute(self.client.get(&url)).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl<T: TokenSource> DashboardApi for HttpDashboardApi<T> {
    #[tracing::instrument(skip_all, fields(field_id = %field_id))]
    async fn field_dashboard(&self, field_id: &FieldId) -> Result<FieldDashboard, ApiError> {
        let payload: FieldDashboardPayload = self.get_json(self.field_dashboard_url(field_id)).await?;
        Ok(FieldDashboard::try_from(payload)?)
    }

    #[tracing::instrument(skip(self))]
    async fn farm_dashboards(&self) -> Result<Vec<FarmDashboard>, ApiError> {
        self.get_json(self.url("/farms/farmdashboard")).await
    }

    #[tracing::instrument(skip_all)]
    async fn create_sensor(&self, request: &CreateSensorRequest) -> Result<(), ApiError> {
        let url = self.url("/fields/newsensor");
        self.execute(self.client.post(&url).json(request)).await?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(sensor_id = %request.sensor_id))]
    async fn update_sensor_reset_date(
        &self,
        request: &UpdateSensorResetDateRequest,
    ) -> Result<(), ApiError> {
        let url = self.url("/fields/sensor/resetdate");
        self.execute(self.client.put(&url).json(request)).await?;
        Ok(())
    }

    #[tracing::instrument(skip_all)]
    async fn create_farm(&self, request: &CreateFarmRequest) -> Result<(), ApiError> {
        let url = self.url("/farms/newfarm");
        self.execute(self.client.post(&url).json(request)).await?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(farm_id = %request.farm_id))]
    async fn create_field(&self, request: &CreateFieldRequest) -> Result<(), ApiError> {
        let url = self.url("/fields/newfield");
        self.execute(self.client.post(&url).json(request)).await?;
        Ok(())
    }
}
