//! Tests for snapshot aggregation and queries
//!
//! Tests cover:
//! - Counts against a fixed dataset
//! - Subscription breakdown merge
//! - Month boundary for growth counts
//! - Append vs replace-daily policies
//! - Failure propagation without partial writes
//! - Range and latest queries

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use shiftdesk_adapter_memory::MemoryAdapter;
use shiftdesk_analytics::{AnalyticsService, FixedMetrics, SnapshotPolicy};
use shiftdesk_core::{
    Company, CompanyFilter, DateRange, ExternalFigures, HealthMetrics, ModelDefinition,
    PlatformAnalytics, PlatformCounts, PlatformError, PlatformResult, Revenue, Role,
    ServerStatus, StorageAdapter, SubscriptionBreakdown, User, UserFilter,
};
use std::sync::Arc;

fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, month, day, hour, 0, 0).unwrap()
}

/// Snapshot instant used throughout: 15 May 2026, 10:00 UTC.
fn now() -> DateTime<Utc> {
    at(5, 15, 10)
}

async fn seeded() -> Arc<MemoryAdapter> {
    let adapter = Arc::new(MemoryAdapter::new());

    let companies = vec![
        Company::new("c1", "Acme").with_plan("pro").created_at(at(1, 10, 9)),
        Company::new("c2", "Globex").with_plan("pro").created_at(at(5, 1, 0)),
        Company::new("c3", "Initech")
            .with_plan("free")
            .with_active(false)
            .created_at(at(4, 30, 23)),
    ];
    for company in &companies {
        adapter.create_company(company).await.unwrap();
    }

    let users = vec![
        User::new("u1", "owner@acme.test", Role::SuperAdmin).created_at(at(1, 10, 9)),
        User::new("u2", "owner@globex.test", Role::SuperAdmin).created_at(at(5, 1, 0)),
        User::new("u3", "north@acme.test", Role::Admin).created_at(at(2, 1, 9)),
        User::new("u4", "ann@acme.test", Role::Employee).created_at(at(2, 3, 9)),
        User::new("u5", "bob@acme.test", Role::Employee)
            .with_active(false)
            .created_at(at(4, 30, 23)),
        User::new("u6", "cy@globex.test", Role::Employee).created_at(at(5, 2, 8)),
        User::new("u7", "di@globex.test", Role::Employee).created_at(at(5, 14, 8)),
    ];
    for user in &users {
        adapter.create_user(user).await.unwrap();
    }

    adapter
}

async fn service(adapter: Arc<MemoryAdapter>, policy: SnapshotPolicy) -> AnalyticsService {
    let service = AnalyticsService::new(adapter).with_policy(policy);
    service.migrate().await.unwrap();
    service
}

mod aggregation_tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_match_dataset() {
        let service = service(seeded().await, SnapshotPolicy::Append).await;
        let snapshot = service.create_snapshot_at(now()).await.unwrap();

        assert_eq!(snapshot.total_companies, 3);
        assert_eq!(snapshot.active_companies, 2);
        assert_eq!(snapshot.total_super_admins, 2);
        assert_eq!(snapshot.total_branches, 1);
        assert_eq!(snapshot.total_employees, 4);
        assert_eq!(snapshot.active_employees, 3);
        assert_eq!(snapshot.date, at(5, 15, 0));
    }

    #[tokio::test]
    async fn test_breakdown_example() {
        let service = service(seeded().await, SnapshotPolicy::Append).await;
        let snapshot = service.create_snapshot_at(now()).await.unwrap();

        assert_eq!(
            snapshot.subscription_breakdown,
            SubscriptionBreakdown {
                free: 1,
                basic: 0,
                pro: 2,
                enterprise: 0
            }
        );
        assert_eq!(snapshot.subscription_breakdown.total(), snapshot.total_companies);
    }

    #[tokio::test]
    async fn test_unknown_plan_dropped_from_breakdown_only() {
        let adapter = seeded().await;
        adapter
            .create_company(&Company::new("c4", "Umbrella").with_plan("platinum"))
            .await
            .unwrap();
        let service = service(adapter, SnapshotPolicy::Append).await;
        let snapshot = service.create_snapshot_at(now()).await.unwrap();

        assert_eq!(snapshot.total_companies, 4);
        assert_eq!(snapshot.subscription_breakdown.total(), 3);
        assert!(snapshot.subscription_breakdown.total() <= snapshot.total_companies);
    }

    #[tokio::test]
    async fn test_growth_counts_start_on_first_of_month() {
        let service = service(seeded().await, SnapshotPolicy::Append).await;
        let snapshot = service.create_snapshot_at(now()).await.unwrap();

        // c2 was created exactly at 1 May 00:00; c3 on 30 April 23:00.
        assert_eq!(snapshot.new_companies_this_month, 1);
        // u6 and u7 are May employees; u5 joined on 30 April; u2 is not an employee.
        assert_eq!(snapshot.new_employees_this_month, 2);
    }

    #[tokio::test]
    async fn test_storage_counts_agree_with_pure_counts() {
        let adapter = seeded().await;
        let companies = adapter.all_companies().await;
        let users = adapter.all_users().await;
        let service = service(adapter, SnapshotPolicy::Append).await;

        let snapshot = service.create_snapshot_at(now()).await.unwrap();
        assert_eq!(
            snapshot.counts(),
            PlatformCounts::from_collections(&companies, &users, now())
        );
    }

    #[tokio::test]
    async fn test_external_figures_are_copied() {
        let figures = ExternalFigures {
            revenue: Revenue {
                total: 5400.0,
                monthly: 450.0,
                yearly: 5400.0,
            },
            churn_rate: 0.02,
            health: HealthMetrics {
                server_status: ServerStatus::Critical,
                average_response_time: 950.0,
                error_rate: 0.2,
            },
        };
        let service = AnalyticsService::new(seeded().await)
            .with_metrics(Arc::new(FixedMetrics(figures)));
        let snapshot = service.create_snapshot_at(now()).await.unwrap();

        assert_eq!(snapshot.total_revenue, 5400.0);
        assert_eq!(snapshot.monthly_revenue, 450.0);
        assert_eq!(snapshot.churn_rate, 0.02);
        assert_eq!(snapshot.server_status, ServerStatus::Critical);
        assert_eq!(snapshot.total_shifts, 0);
    }

    #[tokio::test]
    async fn test_empty_platform_snapshot() {
        let service = service(Arc::new(MemoryAdapter::new()), SnapshotPolicy::Append).await;
        let snapshot = service.create_daily_snapshot().await.unwrap();

        assert_eq!(snapshot.total_companies, 0);
        assert_eq!(snapshot.subscription_breakdown, SubscriptionBreakdown::default());
        assert_eq!(snapshot.server_status, ServerStatus::Healthy);
    }
}

mod policy_tests {
    use super::*;

    #[tokio::test]
    async fn test_append_creates_two_records_same_day() {
        let adapter = seeded().await;
        let service = service(adapter.clone(), SnapshotPolicy::Append).await;

        let first = service.create_snapshot_at(now()).await.unwrap();
        let second = service
            .create_snapshot_at(now() + Duration::hours(3))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.date, second.date);
        assert_eq!(adapter.snapshot_count().await, 2);
    }

    #[tokio::test]
    async fn test_replace_daily_keeps_one_record() {
        let adapter = seeded().await;
        let service = service(adapter.clone(), SnapshotPolicy::ReplaceDaily).await;

        let first = service.create_snapshot_at(now()).await.unwrap();
        adapter
            .create_company(&Company::new("c9", "Late").with_plan("basic"))
            .await
            .unwrap();
        let second = service
            .create_snapshot_at(now() + Duration::hours(3))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.total_companies, 4);
        assert_eq!(adapter.snapshot_count().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_triggers_replace_daily() {
        let adapter = seeded().await;
        let service = service(adapter.clone(), SnapshotPolicy::ReplaceDaily).await;

        let (a, b) = tokio::join!(
            service.create_snapshot_at(now()),
            service.create_snapshot_at(now() + Duration::minutes(1)),
        );
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(adapter.snapshot_count().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_triggers_append() {
        let adapter = seeded().await;
        let service = service(adapter.clone(), SnapshotPolicy::Append).await;

        let (a, b) = tokio::join!(
            service.create_snapshot_at(now()),
            service.create_snapshot_at(now() + Duration::minutes(1)),
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a.id, b.id);
        assert_eq!(a.date, b.date);
        assert_eq!(a.counts(), b.counts());
        assert_eq!(adapter.snapshot_count().await, 2);

        let day = service
            .get_analytics_by_date_range(a.date, a.date)
            .await
            .unwrap();
        assert_eq!(day.len(), 2);
    }
}

mod query_tests {
    use super::*;

    #[tokio::test]
    async fn test_latest_on_empty_store_is_none() {
        let service = service(Arc::new(MemoryAdapter::new()), SnapshotPolicy::Append).await;
        assert!(service.get_latest_analytics().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_range_on_empty_store_is_empty() {
        let service = service(Arc::new(MemoryAdapter::new()), SnapshotPolicy::Append).await;
        let found = service
            .get_analytics_by_date_range(at(1, 1, 0), at(12, 31, 0))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_range_is_inclusive_and_newest_first() {
        let service = service(seeded().await, SnapshotPolicy::Append).await;
        for day in [10, 11, 12, 13, 14] {
            service.create_snapshot_at(at(5, day, 6)).await.unwrap();
        }

        let found = service
            .get_analytics_by_date_range(at(5, 11, 0), at(5, 13, 0))
            .await
            .unwrap();
        let dates: Vec<_> = found.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![at(5, 13, 0), at(5, 12, 0), at(5, 11, 0)]);
    }

    #[tokio::test]
    async fn test_inverted_range_is_empty() {
        let service = service(seeded().await, SnapshotPolicy::Append).await;
        service.create_snapshot_at(now()).await.unwrap();

        let found = service
            .get_analytics_by_date_range(at(5, 20, 0), at(5, 1, 0))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_latest_returns_max_date() {
        let service = service(seeded().await, SnapshotPolicy::Append).await;
        service.create_snapshot_at(at(5, 14, 6)).await.unwrap();
        service.create_snapshot_at(at(5, 12, 6)).await.unwrap();

        let latest = service.get_latest_analytics().await.unwrap().unwrap();
        assert_eq!(latest.date, at(5, 14, 0));
    }
}

mod failure_tests {
    use super::*;

    /// Delegates to a memory adapter but fails every user count.
    struct BrokenUserCounts {
        inner: MemoryAdapter,
    }

    #[async_trait]
    impl StorageAdapter for BrokenUserCounts {
        async fn create_company(&self, company: &Company) -> PlatformResult<Company> {
            self.inner.create_company(company).await
        }

        async fn get_company_by_id(&self, id: &str) -> PlatformResult<Option<Company>> {
            self.inner.get_company_by_id(id).await
        }

        async fn update_company(&self, company: &Company) -> PlatformResult<Company> {
            self.inner.update_company(company).await
        }

        async fn list_companies(
            &self,
            offset: usize,
            limit: usize,
        ) -> PlatformResult<Vec<Company>> {
            self.inner.list_companies(offset, limit).await
        }

        async fn count_companies(&self, filter: &CompanyFilter) -> PlatformResult<u64> {
            self.inner.count_companies(filter).await
        }

        async fn count_companies_by_plan(&self) -> PlatformResult<Vec<(String, u64)>> {
            self.inner.count_companies_by_plan().await
        }

        async fn create_user(&self, user: &User) -> PlatformResult<User> {
            self.inner.create_user(user).await
        }

        async fn get_user_by_id(&self, id: &str) -> PlatformResult<Option<User>> {
            self.inner.get_user_by_id(id).await
        }

        async fn count_users(&self, _filter: &UserFilter) -> PlatformResult<u64> {
            Err(PlatformError::database("user collection unavailable"))
        }

        async fn insert_snapshot(
            &self,
            snapshot: &PlatformAnalytics,
        ) -> PlatformResult<PlatformAnalytics> {
            self.inner.insert_snapshot(snapshot).await
        }

        async fn upsert_snapshot_by_date(
            &self,
            snapshot: &PlatformAnalytics,
        ) -> PlatformResult<PlatformAnalytics> {
            self.inner.upsert_snapshot_by_date(snapshot).await
        }

        async fn find_snapshots(
            &self,
            range: &DateRange,
        ) -> PlatformResult<Vec<PlatformAnalytics>> {
            self.inner.find_snapshots(range).await
        }

        async fn latest_snapshot(&self) -> PlatformResult<Option<PlatformAnalytics>> {
            self.inner.latest_snapshot().await
        }

        async fn migrate(&self, models: &[ModelDefinition]) -> PlatformResult<()> {
            self.inner.migrate(models).await
        }

        async fn collection_exists(&self, name: &str) -> PlatformResult<bool> {
            self.inner.collection_exists(name).await
        }
    }

    #[tokio::test]
    async fn test_query_failure_aborts_without_write() {
        let inner = MemoryAdapter::new();
        let adapter = Arc::new(BrokenUserCounts {
            inner: inner.clone(),
        });
        let service = AnalyticsService::new(adapter);

        let result = service.create_snapshot_at(now()).await;
        match result {
            Err(PlatformError::DatabaseError { message }) => {
                assert_eq!(message, "user collection unavailable")
            }
            other => panic!("expected database error, got {other:?}"),
        }
        assert_eq!(inner.snapshot_count().await, 0);
    }
}
