//! Admin API handlers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shiftdesk_analytics::AnalyticsService;
use shiftdesk_core::error::{PlatformError, PlatformResult};
use shiftdesk_core::query::CompanyFilter;
use shiftdesk_core::types::{start_of_day, Company};

use crate::stats::{AnalyticsDashboard, PlatformStats};
use crate::AdminConfig;

/// Company list response.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyListResponse {
    pub companies: Vec<CompanySummary>,
    pub total: u64,
    pub page: usize,
    pub per_page: usize,
}

/// Company summary for list view.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompanySummary {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub plan: String,
    pub created_at: String,
}

impl From<Company> for CompanySummary {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            is_active: company.is_active,
            plan: company.subscription.plan,
            created_at: company.created_at.to_rfc3339(),
        }
    }
}

/// Platform admin API service.
pub struct AdminApi {
    config: AdminConfig,
    analytics: AnalyticsService,
}

impl AdminApi {
    /// Creates a new admin API.
    pub fn new(config: AdminConfig, analytics: AnalyticsService) -> Self {
        Self { config, analytics }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Gets the analytics service.
    pub fn analytics(&self) -> &AnalyticsService {
        &self.analytics
    }

    /// Lists companies with pagination. Pages start at zero; `per_page` is
    /// clamped to the configured maximum.
    pub async fn list_companies(
        &self,
        page: usize,
        per_page: usize,
    ) -> PlatformResult<CompanyListResponse> {
        if per_page == 0 {
            return Err(PlatformError::invalid_field("per_page", "must be at least 1"));
        }
        let per_page = per_page.min(self.config.max_page_size);
        let offset = page.saturating_mul(per_page);

        let adapter = self.analytics.adapter();
        let companies = adapter.list_companies(offset, per_page).await?;
        let total = adapter.count_companies(&CompanyFilter::all()).await?;

        Ok(CompanyListResponse {
            companies: companies.into_iter().map(CompanySummary::from).collect(),
            total,
            page,
            per_page,
        })
    }

    /// Gets a company by ID.
    pub async fn get_company(&self, id: &str) -> PlatformResult<Company> {
        self.analytics
            .adapter()
            .get_company_by_id(id)
            .await?
            .ok_or_else(|| PlatformError::not_found("company", "id", id))
    }

    /// Activates or deactivates a company.
    pub async fn set_company_active(&self, id: &str, is_active: bool) -> PlatformResult<Company> {
        let mut company = self.get_company(id).await?;
        company.is_active = is_active;
        company.updated_at = Utc::now();

        let updated = self.analytics.adapter().update_company(&company).await?;
        tracing::info!(company = %id, is_active, "company status changed");
        Ok(updated)
    }

    /// Computes live platform statistics without storing a snapshot.
    pub async fn stats(&self) -> PlatformResult<PlatformStats> {
        let counts = self.analytics.current_counts().await?;
        Ok(PlatformStats {
            generated_at: Utc::now(),
            counts,
        })
    }

    /// Builds the dashboard for the `days` calendar days ending on the day
    /// containing `now`. Falls back to the configured window when `days` is 0
    /// and rejects windows longer than `max_dashboard_days`.
    pub async fn dashboard(
        &self,
        days: u32,
        now: DateTime<Utc>,
    ) -> PlatformResult<AnalyticsDashboard> {
        let days = if days == 0 { self.config.dashboard_days } else { days }.max(1);
        if days > self.config.max_dashboard_days {
            return Err(PlatformError::invalid_field(
                "days",
                format!("must be at most {}", self.config.max_dashboard_days),
            ));
        }

        let end = start_of_day(now);
        let start = end
            .checked_sub_signed(Duration::days(i64::from(days) - 1))
            .ok_or_else(|| PlatformError::invalid_field("days", "window starts out of range"))?;

        let (snapshots, latest) = tokio::try_join!(
            self.analytics.get_analytics_by_date_range(start, end),
            self.analytics.get_latest_analytics(),
        )?;

        Ok(AnalyticsDashboard::from_snapshots(latest, &snapshots))
    }
}
