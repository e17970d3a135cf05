//! Storage-backed computation of platform counts.

use chrono::{DateTime, Utc};
use shiftdesk_core::error::PlatformResult;
use shiftdesk_core::query::{CompanyFilter, UserFilter};
use shiftdesk_core::traits::StorageAdapter;
use shiftdesk_core::types::{start_of_month, PlatformCounts, Role, SubscriptionBreakdown};

/// Computes the platform counts as of `now` using the adapter's queries.
///
/// All queries are independent and run concurrently. The first failure
/// aborts the whole computation and is returned as-is.
pub async fn collect_counts(
    adapter: &dyn StorageAdapter,
    now: DateTime<Utc>,
) -> PlatformResult<PlatformCounts> {
    let month_start = start_of_month(now);

    let all_companies = CompanyFilter::all();
    let active_companies = CompanyFilter::all().active(true);
    let new_companies = CompanyFilter::all().created_since(month_start);
    let super_admins = UserFilter::role(Role::SuperAdmin);
    let branches = UserFilter::role(Role::Admin);
    let employees = UserFilter::role(Role::Employee);
    let active_employees = UserFilter::role(Role::Employee).active(true);
    let new_employees = UserFilter::role(Role::Employee).created_since(month_start);

    let (
        total_companies,
        active_companies,
        total_super_admins,
        total_branches,
        total_employees,
        active_employees,
        plan_groups,
        new_companies_this_month,
        new_employees_this_month,
    ) = tokio::try_join!(
        adapter.count_companies(&all_companies),
        adapter.count_companies(&active_companies),
        adapter.count_users(&super_admins),
        adapter.count_users(&branches),
        adapter.count_users(&employees),
        adapter.count_users(&active_employees),
        adapter.count_companies_by_plan(),
        adapter.count_companies(&new_companies),
        adapter.count_users(&new_employees),
    )?;

    Ok(PlatformCounts {
        total_companies,
        active_companies,
        total_super_admins,
        total_branches,
        total_employees,
        active_employees,
        new_companies_this_month,
        new_employees_this_month,
        subscription_breakdown: SubscriptionBreakdown::from_plan_counts(plan_groups),
    })
}
