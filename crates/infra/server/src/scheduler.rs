//! Daily snapshot job.

use chrono::{DateTime, Duration, Utc};
use shiftdesk_analytics::AnalyticsService;
use shiftdesk_core::types::start_of_day;
use tokio::task::JoinHandle;

/// Takes one platform snapshot per day at a fixed UTC hour.
pub struct DailySnapshotScheduler {
    analytics: AnalyticsService,
    hour_utc: u32,
}

impl DailySnapshotScheduler {
    /// Creates a scheduler firing at `hour_utc` (0-23).
    pub fn new(analytics: AnalyticsService, hour_utc: u32) -> Self {
        Self {
            analytics,
            hour_utc: hour_utc.min(23),
        }
    }

    /// Next firing instant strictly after `now`.
    pub fn next_run_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = start_of_day(now) + Duration::hours(i64::from(self.hour_utc));
        if today > now {
            today
        } else {
            today + Duration::days(1)
        }
    }

    /// Runs the job on the current runtime until the task is aborted.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    async fn run(self) {
        loop {
            let now = Utc::now();
            let next = self.next_run_after(now);
            tracing::debug!(next_run = %next, "daily snapshot scheduled");
            tokio::time::sleep((next - now).to_std().unwrap_or_default()).await;

            match self.analytics.create_daily_snapshot().await {
                Ok(snapshot) => tracing::info!(id = %snapshot.id, "daily snapshot complete"),
                Err(e) => tracing::error!(error = %e, "daily snapshot failed"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shiftdesk_adapter_memory::MemoryAdapter;
    use std::sync::Arc;

    fn scheduler(hour: u32) -> DailySnapshotScheduler {
        DailySnapshotScheduler::new(AnalyticsService::new(Arc::new(MemoryAdapter::new())), hour)
    }

    #[test]
    fn test_next_run_later_today() {
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 1, 30, 0).unwrap();
        assert_eq!(
            scheduler(2).next_run_after(now),
            Utc.with_ymd_and_hms(2026, 3, 9, 2, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_next_run_rolls_to_tomorrow() {
        let now = Utc.with_ymd_and_hms(2026, 3, 31, 2, 0, 0).unwrap();
        assert_eq!(
            scheduler(2).next_run_after(now),
            Utc.with_ymd_and_hms(2026, 4, 1, 2, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_hour_is_clamped() {
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 0, 0, 0).unwrap();
        assert_eq!(
            scheduler(99).next_run_after(now),
            Utc.with_ymd_and_hms(2026, 3, 9, 23, 0, 0).unwrap()
        );
    }
}
