//! # Shiftdesk Server
//!
//! Standalone platform analytics server. Serves the analytics and admin
//! routes and optionally takes the daily snapshot itself.

mod config;
mod scheduler;

pub use config::{
    load_config, parse_config, AnalyticsConfig, ConfigError, PlatformConfig, ServerConfig,
};
pub use scheduler::DailySnapshotScheduler;

use axum::Router;
use shiftdesk_adapter_memory::MemoryAdapter;
use shiftdesk_admin::AdminApi;
use shiftdesk_analytics::AnalyticsService;
use shiftdesk_core::error::PlatformError;
use shiftdesk_core::traits::StorageAdapter;
use shiftdesk_axum::{platform_routes, RequestLogLayer};
use std::sync::Arc;

/// Server startup or runtime error.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The platform analytics server.
pub struct PlatformServer {
    /// Server configuration.
    pub config: PlatformConfig,
    api: Arc<AdminApi>,
}

impl PlatformServer {
    /// Creates a server backed by an in-memory store.
    pub async fn new(config: PlatformConfig) -> Result<Self, ServerError> {
        Self::with_adapter(config, Arc::new(MemoryAdapter::new())).await
    }

    /// Creates a server over the given store and defines its collections.
    pub async fn with_adapter(
        config: PlatformConfig,
        adapter: Arc<dyn StorageAdapter>,
    ) -> Result<Self, ServerError> {
        let analytics =
            AnalyticsService::new(adapter).with_policy(config.analytics.snapshot_policy);
        analytics.migrate().await?;

        let api = Arc::new(AdminApi::new(config.admin_config(), analytics));
        Ok(Self { config, api })
    }

    /// Gets the admin API.
    pub fn api(&self) -> &Arc<AdminApi> {
        &self.api
    }

    /// Builds the HTTP router.
    pub fn router(&self) -> Router {
        platform_routes(self.api.clone()).layer(RequestLogLayer::new())
    }

    /// Binds the listener and serves until the process stops.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!(
            %addr,
            policy = ?self.config.analytics.snapshot_policy,
            "Starting Shiftdesk server"
        );

        let _scheduler = if self.config.analytics.schedule_enabled {
            let hour_utc = self.config.analytics.schedule_hour_utc;
            tracing::info!(hour_utc, "daily snapshot job enabled");
            let job = DailySnapshotScheduler::new(self.api.analytics().clone(), hour_utc);
            Some(job.spawn())
        } else {
            None
        };

        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}
