//! # Shiftdesk Admin
//!
//! Platform admin API for Shiftdesk.
//! Provides tenant management, live platform statistics and the analytics
//! dashboard built from daily snapshots.

mod api;
mod stats;

pub use api::*;
pub use stats::*;

use serde::{Deserialize, Serialize};

/// Platform admin configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Whether the admin routes are mounted.
    pub enabled: bool,
    /// Path to mount the admin routes.
    pub path: String,
    /// Upper bound for `per_page` in listings.
    pub max_page_size: usize,
    /// Days covered by the dashboard when the caller does not say.
    pub dashboard_days: u32,
    /// Longest dashboard window a caller may ask for.
    pub max_dashboard_days: u32,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/admin".to_string(),
            max_page_size: 100,
            dashboard_days: 30,
            max_dashboard_days: 366,
        }
    }
}

impl AdminConfig {
    /// Creates a new admin config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the maximum page size.
    pub fn max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size;
        self
    }

    /// Sets the default dashboard window.
    pub fn dashboard_days(mut self, days: u32) -> Self {
        self.dashboard_days = days;
        self
    }

    /// Sets the longest dashboard window.
    pub fn max_dashboard_days(mut self, days: u32) -> Self {
        self.max_dashboard_days = days;
        self
    }

    /// Disables the admin routes.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
