//! Snapshot creation and queries.

use chrono::{DateTime, Utc};
use shiftdesk_core::error::PlatformResult;
use shiftdesk_core::query::DateRange;
use shiftdesk_core::schema::platform_schema;
use shiftdesk_core::traits::StorageAdapter;
use shiftdesk_core::types::{start_of_day, PlatformAnalytics, PlatformCounts};
use std::sync::Arc;

use crate::aggregator::collect_counts;
use crate::lock::SnapshotLocks;
use crate::metrics::{ExternalMetrics, NoExternalMetrics};
use crate::SnapshotPolicy;

/// Platform analytics service.
///
/// Cheap to clone; clones share the adapter and the per-day locks.
#[derive(Clone)]
pub struct AnalyticsService {
    adapter: Arc<dyn StorageAdapter>,
    metrics: Arc<dyn ExternalMetrics>,
    policy: SnapshotPolicy,
    locks: SnapshotLocks,
}

impl AnalyticsService {
    /// Creates a service using the append policy and no external figures.
    pub fn new(adapter: Arc<dyn StorageAdapter>) -> Self {
        Self {
            adapter,
            metrics: Arc::new(NoExternalMetrics),
            policy: SnapshotPolicy::default(),
            locks: SnapshotLocks::new(),
        }
    }

    /// Sets the source of revenue, churn and health figures.
    pub fn with_metrics(mut self, metrics: Arc<dyn ExternalMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Sets the write policy.
    pub fn with_policy(mut self, policy: SnapshotPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Gets the write policy.
    pub fn policy(&self) -> SnapshotPolicy {
        self.policy
    }

    /// Gets the storage adapter.
    pub fn adapter(&self) -> &Arc<dyn StorageAdapter> {
        &self.adapter
    }

    /// Defines the platform collections, with a unique `date` index under
    /// the replace-daily policy.
    pub async fn migrate(&self) -> PlatformResult<()> {
        self.adapter
            .migrate(&platform_schema(self.policy.unique_date()))
            .await
    }

    /// Computes and persists a snapshot of the platform as it is now.
    pub async fn create_daily_snapshot(&self) -> PlatformResult<PlatformAnalytics> {
        self.create_snapshot_at(Utc::now()).await
    }

    /// Computes and persists a snapshot as of `now`.
    ///
    /// Every read completes before the single write, so a failed read leaves
    /// the store untouched.
    pub async fn create_snapshot_at(
        &self,
        now: DateTime<Utc>,
    ) -> PlatformResult<PlatformAnalytics> {
        let day = start_of_day(now);
        let _guard = self.locks.acquire(day).await;

        let (counts, figures) = tokio::try_join!(
            collect_counts(self.adapter.as_ref(), now),
            self.metrics.figures(now),
        )
        .inspect_err(|e| {
            tracing::warn!(date = %day.date_naive(), error = %e, "snapshot aggregation failed")
        })?;

        let snapshot = PlatformAnalytics::new(now, counts, figures);
        let stored = match self.policy {
            SnapshotPolicy::Append => self.adapter.insert_snapshot(&snapshot).await?,
            SnapshotPolicy::ReplaceDaily => self.adapter.upsert_snapshot_by_date(&snapshot).await?,
        };

        tracing::info!(
            id = %stored.id,
            date = %stored.date.date_naive(),
            total_companies = stored.total_companies,
            total_employees = stored.total_employees,
            "analytics snapshot stored"
        );

        Ok(stored)
    }

    /// Computes the current counts without persisting anything.
    pub async fn current_counts(&self) -> PlatformResult<PlatformCounts> {
        collect_counts(self.adapter.as_ref(), Utc::now()).await
    }

    /// Returns snapshots dated within `[start, end]`, newest first.
    ///
    /// An inverted range yields no snapshots.
    pub async fn get_analytics_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PlatformResult<Vec<PlatformAnalytics>> {
        let range = DateRange::new(start, end);
        if range.is_inverted() {
            return Ok(Vec::new());
        }
        self.adapter.find_snapshots(&range).await
    }

    /// Returns the most recent snapshot, if any exists.
    pub async fn get_latest_analytics(&self) -> PlatformResult<Option<PlatformAnalytics>> {
        self.adapter.latest_snapshot().await
    }
}
