//! Server configuration.

use serde::{Deserialize, Serialize};
use shiftdesk_admin::AdminConfig;
use shiftdesk_analytics::SnapshotPolicy;

/// Server-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Host to bind to.
    pub host: String,
    /// Enable admin API.
    pub enable_admin_api: bool,
    /// Log level.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            enable_admin_api: true,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Address to bind, as `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Snapshot and dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Whether a second snapshot on the same day appends or replaces.
    pub snapshot_policy: SnapshotPolicy,
    /// Run the daily snapshot job inside the server.
    pub schedule_enabled: bool,
    /// UTC hour (0-23) at which the daily job fires.
    pub schedule_hour_utc: u32,
    /// Default dashboard window in days.
    pub dashboard_days: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            snapshot_policy: SnapshotPolicy::Append,
            schedule_enabled: false,
            schedule_hour_utc: 0,
            dashboard_days: 30,
        }
    }
}

/// Complete configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub server: ServerConfig,
    pub analytics: AnalyticsConfig,
}

impl PlatformConfig {
    /// Derives the admin API configuration.
    pub fn admin_config(&self) -> AdminConfig {
        let config = AdminConfig::new().dashboard_days(self.analytics.dashboard_days);
        if self.server.enable_admin_api {
            config
        } else {
            config.disabled()
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.analytics.schedule_hour_utc > 23 {
            return Err(ConfigError::Invalid(format!(
                "analytics.schedule_hour_utc must be 0-23, got {}",
                self.analytics.schedule_hour_utc
            )));
        }
        let max_days = AdminConfig::default().max_dashboard_days;
        if self.analytics.dashboard_days == 0 || self.analytics.dashboard_days > max_days {
            return Err(ConfigError::Invalid(format!(
                "analytics.dashboard_days must be 1-{max_days}, got {}",
                self.analytics.dashboard_days
            )));
        }
        Ok(self)
    }
}

/// Parses configuration from TOML text. Missing sections and keys take
/// their defaults.
pub fn parse_config(content: &str) -> Result<PlatformConfig, ConfigError> {
    let config: PlatformConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()
}

/// Loads configuration from a TOML file.
pub fn load_config(path: &str) -> Result<PlatformConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
    parse_config(&content)
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
