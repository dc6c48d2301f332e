//! Configuration management for the GDD field dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with GDD_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::ChartSettings;

use crate::services::RefreshPolicy;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Upstream dashboard API
    pub api: ApiConfig,

    /// Chart construction tunables
    pub charts: ChartSettings,

    pub session: SessionConfig,

    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,

    /// Bearer token attached to every request, if any
    pub bearer_token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionConfig {
    /// What a session does after a successful mutation
    pub refresh_policy: RefreshPolicy,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human-readable format
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("GDD_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        Self::load_for(&environment)
    }

    /// Load configuration for an explicit environment name
    pub fn load_for(environment: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment)?
            .set_default("api.base_url", "http://localhost:8000")?
            .set_default("api.timeout_secs", 30)?
            .set_default("charts.smoothing_window", 3)?
            .set_default("charts.temperature_suggested_min", 24.5)?
            .set_default("charts.temperature_suggested_max", 26.0)?
            .set_default("session.refresh_policy", "full_reload")?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (GDD_ prefix)
            .add_source(
                Environment::with_prefix("GDD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            bearer_token: None,
            timeout_secs: 30,
        }
    }
}
