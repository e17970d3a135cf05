//! Core data types for Shiftdesk.
//!
//! This module defines the tenant (`Company`), the platform `User`, and the
//! daily `PlatformAnalytics` snapshot together with the value types the
//! snapshot is made of.

use chrono::{DateTime, Datelike, Days, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Truncates an instant to midnight UTC of the same calendar day.
pub fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Returns midnight UTC of the first calendar day of the instant's month.
pub fn start_of_month(at: DateTime<Utc>) -> DateTime<Utc> {
    let day = at.date_naive();
    let first = day - Days::new(u64::from(day.day0()));
    first.and_time(NaiveTime::MIN).and_utc()
}

// ==================== Tenants ====================

/// Subscription plan tier recognised by the analytics breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Free,
    Basic,
    Pro,
    Enterprise,
}

impl PlanTier {
    /// All known tiers, cheapest first.
    pub const ALL: [PlanTier; 4] = [Self::Free, Self::Basic, Self::Pro, Self::Enterprise];

    /// Parses a stored plan label. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "free" => Some(Self::Free),
            "basic" => Some(Self::Basic),
            "pro" => Some(Self::Pro),
            "enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }

    /// Returns the stored label for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription attached to a company.
///
/// The plan is kept as the raw stored label so that records carrying a tier
/// this build does not know about can still be loaded and counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub plan: String,
}

impl Default for Subscription {
    fn default() -> Self {
        Self {
            plan: PlanTier::Free.as_str().to_string(),
        }
    }
}

/// A tenant of the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier for the company
    pub id: String,

    /// Display name
    pub name: String,

    /// Whether the tenant is currently active
    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Subscription details
    #[serde(default)]
    pub subscription: Subscription,

    /// Timestamp when the company was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the company was last updated
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Creates an active company on the free plan.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            is_active: true,
            subscription: Subscription::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the subscription plan label.
    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.subscription.plan = plan.into();
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Overrides the creation timestamp.
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self.updated_at = at;
        self
    }

    /// Returns the known plan tier, if the stored label is recognised.
    pub fn plan_tier(&self) -> Option<PlanTier> {
        PlanTier::parse(&self.subscription.plan)
    }
}

fn default_true() -> bool {
    true
}

// ==================== Users ====================

/// Role of a platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Owner of a company account.
    SuperAdmin,
    /// Branch manager; each admin counts as one branch.
    Admin,
    /// Staff member.
    Employee,
    /// Any role label this build does not know.
    #[serde(other)]
    Other,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Employee => "employee",
            Self::Other => "other",
        }
    }
}

/// A user of the platform (owner, branch admin or employee).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: String,

    /// User's email address
    pub email: String,

    /// Optional display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Role within the tenant
    pub role: Role,

    /// Whether the account is active
    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Tenant the user belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates an active user with the given role.
    pub fn new(id: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            email: email.into(),
            name: None,
            role,
            is_active: true,
            company_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Attaches the user to a company.
    pub fn with_company(mut self, company_id: impl Into<String>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }

    /// Overrides the creation timestamp.
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self.updated_at = at;
        self
    }
}

// ==================== Analytics ====================

/// Subscriber count per known plan tier.
///
/// Keys are fixed; labels outside the known set are never recorded, so the
/// sum can be lower than the number of companies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionBreakdown {
    pub free: u64,
    pub basic: u64,
    pub pro: u64,
    pub enterprise: u64,
}

impl SubscriptionBreakdown {
    /// Builds a breakdown from grouped `(plan label, count)` pairs.
    pub fn from_plan_counts<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut breakdown = Self::default();
        for (label, count) in groups {
            if let Some(tier) = PlanTier::parse(label.as_ref()) {
                breakdown.add(tier, count);
            }
        }
        breakdown
    }

    /// Builds a breakdown directly from company records.
    pub fn from_companies(companies: &[Company]) -> Self {
        let mut breakdown = Self::default();
        for tier in companies.iter().filter_map(Company::plan_tier) {
            breakdown.add(tier, 1);
        }
        breakdown
    }

    /// Adds `count` subscribers to a tier.
    pub fn add(&mut self, tier: PlanTier, count: u64) {
        *self.slot(tier) += count;
    }

    /// Returns the count for a tier.
    pub fn get(&self, tier: PlanTier) -> u64 {
        match tier {
            PlanTier::Free => self.free,
            PlanTier::Basic => self.basic,
            PlanTier::Pro => self.pro,
            PlanTier::Enterprise => self.enterprise,
        }
    }

    /// Sum over all tiers.
    pub fn total(&self) -> u64 {
        self.free + self.basic + self.pro + self.enterprise
    }

    fn slot(&mut self, tier: PlanTier) -> &mut u64 {
        match tier {
            PlanTier::Free => &mut self.free,
            PlanTier::Basic => &mut self.basic,
            PlanTier::Pro => &mut self.pro,
            PlanTier::Enterprise => &mut self.enterprise,
        }
    }
}

/// Overall platform health as reported by monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    #[default]
    Healthy,
    Warning,
    Critical,
}

/// Revenue figures, in an unspecified currency unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Revenue {
    pub total: f64,
    pub monthly: f64,
    pub yearly: f64,
}

/// Health figures supplied by monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub server_status: ServerStatus,
    /// Average response time in milliseconds.
    pub average_response_time: f64,
    pub error_rate: f64,
}

/// Figures that are populated from outside the platform collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalFigures {
    pub revenue: Revenue,
    pub churn_rate: f64,
    pub health: HealthMetrics,
}

/// Counts derived from the company and user collections at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCounts {
    pub total_companies: u64,
    pub active_companies: u64,
    pub total_super_admins: u64,
    pub total_branches: u64,
    pub total_employees: u64,
    pub active_employees: u64,
    pub new_companies_this_month: u64,
    pub new_employees_this_month: u64,
    pub subscription_breakdown: SubscriptionBreakdown,
}

impl PlatformCounts {
    /// Computes the counts from in-memory collections as of `now`.
    ///
    /// Mirrors the storage-backed aggregation: branches are users with the
    /// `admin` role, and "this month" starts at 00:00 UTC on day one.
    pub fn from_collections(companies: &[Company], users: &[User], now: DateTime<Utc>) -> Self {
        let month_start = start_of_month(now);
        let count = |it: usize| it as u64;

        let employees = || users.iter().filter(|u| u.role == Role::Employee);

        Self {
            total_companies: count(companies.len()),
            active_companies: count(companies.iter().filter(|c| c.is_active).count()),
            total_super_admins: count(
                users.iter().filter(|u| u.role == Role::SuperAdmin).count(),
            ),
            total_branches: count(users.iter().filter(|u| u.role == Role::Admin).count()),
            total_employees: count(employees().count()),
            active_employees: count(employees().filter(|u| u.is_active).count()),
            new_companies_this_month: count(
                companies.iter().filter(|c| c.created_at >= month_start).count(),
            ),
            new_employees_this_month: count(
                employees().filter(|u| u.created_at >= month_start).count(),
            ),
            subscription_breakdown: SubscriptionBreakdown::from_companies(companies),
        }
    }
}

/// One persisted analytics record for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformAnalytics {
    /// Unique identifier of the record
    pub id: String,

    /// Calendar day of the snapshot, truncated to midnight UTC
    pub date: DateTime<Utc>,

    pub total_companies: u64,
    pub active_companies: u64,
    pub total_super_admins: u64,
    pub total_branches: u64,
    pub total_employees: u64,
    pub active_employees: u64,

    pub total_revenue: f64,
    pub monthly_revenue: f64,
    pub yearly_revenue: f64,

    pub subscription_breakdown: SubscriptionBreakdown,

    pub new_companies_this_month: u64,
    pub new_employees_this_month: u64,
    pub churn_rate: f64,

    pub server_status: ServerStatus,
    pub average_response_time: f64,
    pub error_rate: f64,

    /// Not populated by the aggregator
    #[serde(default)]
    pub total_shifts: u64,
    /// Not populated by the aggregator
    #[serde(default)]
    pub total_attendance_records: u64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlatformAnalytics {
    /// Assembles a snapshot for the calendar day containing `at`.
    pub fn new(at: DateTime<Utc>, counts: PlatformCounts, figures: ExternalFigures) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date: start_of_day(at),
            total_companies: counts.total_companies,
            active_companies: counts.active_companies,
            total_super_admins: counts.total_super_admins,
            total_branches: counts.total_branches,
            total_employees: counts.total_employees,
            active_employees: counts.active_employees,
            total_revenue: figures.revenue.total,
            monthly_revenue: figures.revenue.monthly,
            yearly_revenue: figures.revenue.yearly,
            subscription_breakdown: counts.subscription_breakdown,
            new_companies_this_month: counts.new_companies_this_month,
            new_employees_this_month: counts.new_employees_this_month,
            churn_rate: figures.churn_rate,
            server_status: figures.health.server_status,
            average_response_time: figures.health.average_response_time,
            error_rate: figures.health.error_rate,
            total_shifts: 0,
            total_attendance_records: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the count section of the snapshot.
    pub fn counts(&self) -> PlatformCounts {
        PlatformCounts {
            total_companies: self.total_companies,
            active_companies: self.active_companies,
            total_super_admins: self.total_super_admins,
            total_branches: self.total_branches,
            total_employees: self.total_employees,
            active_employees: self.active_employees,
            new_companies_this_month: self.new_companies_this_month,
            new_employees_this_month: self.new_employees_this_month,
            subscription_breakdown: self.subscription_breakdown,
        }
    }
}
