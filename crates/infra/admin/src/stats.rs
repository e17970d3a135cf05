//! Statistics and analytics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shiftdesk_core::types::{PlatformAnalytics, PlatformCounts};

/// Live platform statistics, computed on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformStats {
    /// When the counts were taken.
    pub generated_at: DateTime<Utc>,
    /// Current counts.
    #[serde(flatten)]
    pub counts: PlatformCounts,
}

/// Time series data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Chart data for analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub label: String,
    pub data: Vec<DataPoint>,
}

impl ChartData {
    /// Creates new chart data.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: Vec::new(),
        }
    }

    /// Adds a data point.
    pub fn point(mut self, timestamp: DateTime<Utc>, value: f64) -> Self {
        self.data.push(DataPoint { timestamp, value });
        self
    }
}

/// Analytics dashboard data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsDashboard {
    /// Most recent snapshot, if any has been taken.
    pub latest: Option<PlatformAnalytics>,
    /// Companies over time.
    pub companies_chart: ChartData,
    /// Employees over time.
    pub employees_chart: ChartData,
    /// Monthly revenue over time.
    pub revenue_chart: ChartData,
}

impl Default for AnalyticsDashboard {
    fn default() -> Self {
        Self {
            latest: None,
            companies_chart: ChartData::new("Companies"),
            employees_chart: ChartData::new("Employees"),
            revenue_chart: ChartData::new("Monthly Revenue"),
        }
    }
}

impl AnalyticsDashboard {
    /// Builds the dashboard from snapshots ordered newest first.
    ///
    /// Charts run oldest to newest with one point per day; when a day has
    /// several snapshots the newest one wins.
    pub fn from_snapshots(
        latest: Option<PlatformAnalytics>,
        newest_first: &[PlatformAnalytics],
    ) -> Self {
        let mut per_day: Vec<&PlatformAnalytics> = Vec::new();
        for snapshot in newest_first {
            if per_day.last().is_none_or(|kept| kept.date != snapshot.date) {
                per_day.push(snapshot);
            }
        }

        let mut dashboard = Self {
            latest,
            ..Self::default()
        };
        for snapshot in per_day.into_iter().rev() {
            dashboard.companies_chart = dashboard
                .companies_chart
                .point(snapshot.date, snapshot.total_companies as f64);
            dashboard.employees_chart = dashboard
                .employees_chart
                .point(snapshot.date, snapshot.total_employees as f64);
            dashboard.revenue_chart = dashboard
                .revenue_chart
                .point(snapshot.date, snapshot.monthly_revenue);
        }
        dashboard
    }
}
