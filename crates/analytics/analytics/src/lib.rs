//! # Shiftdesk Analytics
//!
//! Daily cross-tenant analytics for the platform admin:
//! - Snapshot aggregation over the company and user collections
//! - Date-range and latest-snapshot queries
//! - Per-day trigger locking
//! - Pluggable source for revenue, churn and health figures
//!
//! ## Example
//!
//! ```rust,ignore
//! use shiftdesk_analytics::{AnalyticsService, SnapshotPolicy};
//!
//! let service = AnalyticsService::new(adapter).with_policy(SnapshotPolicy::Append);
//! service.migrate().await?;
//!
//! let snapshot = service.create_daily_snapshot().await?;
//! let latest = service.get_latest_analytics().await?;
//! ```

mod aggregator;
mod lock;
mod metrics;
mod service;

pub use aggregator::collect_counts;
pub use lock::SnapshotLocks;
pub use metrics::{ExternalMetrics, FixedMetrics, NoExternalMetrics};
pub use service::AnalyticsService;

use serde::{Deserialize, Serialize};

/// How a snapshot is written when one already exists for the same day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotPolicy {
    /// Every call inserts a new record; several records may share a date.
    #[default]
    Append,
    /// The record for the day is replaced; `date` carries a unique index.
    ReplaceDaily,
}

impl SnapshotPolicy {
    /// Whether the snapshot collection needs a unique `date` index.
    pub fn unique_date(&self) -> bool {
        matches!(self, Self::ReplaceDaily)
    }
}
