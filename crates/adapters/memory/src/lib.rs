//! # Shiftdesk Memory Adapter
//!
//! An in-memory document store for Shiftdesk, primarily intended for
//! testing and development.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shiftdesk_adapter_memory::MemoryAdapter;
//!
//! let adapter = Arc::new(MemoryAdapter::new());
//! let analytics = AnalyticsService::new(adapter.clone());
//! ```

use async_trait::async_trait;
use chrono::Utc;
use shiftdesk_core::error::{PlatformError, PlatformResult};
use shiftdesk_core::query::{CompanyFilter, DateRange, UserFilter};
use shiftdesk_core::schema::{ModelDefinition, SchemaDefinition, ANALYTICS_COLLECTION};
use shiftdesk_core::traits::StorageAdapter;
use shiftdesk_core::types::{Company, PlatformAnalytics, User};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage for a single keyed collection.
type Store<T> = Arc<RwLock<HashMap<String, T>>>;

/// In-memory storage adapter for Shiftdesk.
///
/// Snapshots are kept in insertion order so that several records for the
/// same day can coexist, as they do in the document store when the `date`
/// index is not unique. Data is lost when the process exits.
#[derive(Debug, Clone)]
pub struct MemoryAdapter {
    companies: Store<Company>,
    users: Store<User>,
    snapshots: Arc<RwLock<Vec<PlatformAnalytics>>>,
    models: Store<ModelDefinition>,
}

impl MemoryAdapter {
    /// Creates a new in-memory adapter.
    pub fn new() -> Self {
        Self {
            companies: Arc::new(RwLock::new(HashMap::new())),
            users: Arc::new(RwLock::new(HashMap::new())),
            snapshots: Arc::new(RwLock::new(Vec::new())),
            models: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of snapshots stored.
    pub async fn snapshot_count(&self) -> usize {
        self.snapshots.read().await.len()
    }

    /// Returns every company, in no particular order.
    pub async fn all_companies(&self) -> Vec<Company> {
        self.companies.read().await.values().cloned().collect()
    }

    /// Returns every user, in no particular order.
    pub async fn all_users(&self) -> Vec<User> {
        self.users.read().await.values().cloned().collect()
    }

    async fn unique_snapshot_date(&self) -> bool {
        self.models
            .read()
            .await
            .get(ANALYTICS_COLLECTION)
            .is_some_and(|m| m.is_unique_on("date"))
    }
}

impl Default for MemoryAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageAdapter for MemoryAdapter {
    // ==================== Company Operations ====================

    async fn create_company(&self, company: &Company) -> PlatformResult<Company> {
        let mut companies = self.companies.write().await;

        if companies.contains_key(&company.id) {
            return Err(PlatformError::duplicate("company", "id", &company.id));
        }

        companies.insert(company.id.clone(), company.clone());
        Ok(company.clone())
    }

    async fn get_company_by_id(&self, id: &str) -> PlatformResult<Option<Company>> {
        let companies = self.companies.read().await;
        Ok(companies.get(id).cloned())
    }

    async fn update_company(&self, company: &Company) -> PlatformResult<Company> {
        let mut companies = self.companies.write().await;

        if !companies.contains_key(&company.id) {
            return Err(PlatformError::not_found("company", "id", &company.id));
        }

        companies.insert(company.id.clone(), company.clone());
        Ok(company.clone())
    }

    async fn list_companies(&self, offset: usize, limit: usize) -> PlatformResult<Vec<Company>> {
        let companies = self.companies.read().await;
        let mut sorted: Vec<&Company> = companies.values().collect();
        sorted.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        Ok(sorted
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_companies(&self, filter: &CompanyFilter) -> PlatformResult<u64> {
        let companies = self.companies.read().await;
        Ok(companies.values().filter(|c| filter.matches(c)).count() as u64)
    }

    async fn count_companies_by_plan(&self) -> PlatformResult<Vec<(String, u64)>> {
        let companies = self.companies.read().await;
        let mut groups: HashMap<String, u64> = HashMap::new();

        for company in companies.values() {
            *groups.entry(company.subscription.plan.clone()).or_default() += 1;
        }

        let mut groups: Vec<_> = groups.into_iter().collect();
        groups.sort();
        Ok(groups)
    }

    // ==================== User Operations ====================

    async fn create_user(&self, user: &User) -> PlatformResult<User> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) {
            return Err(PlatformError::duplicate("user", "id", &user.id));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(PlatformError::duplicate("user", "email", &user.email));
        }

        users.insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }

    async fn get_user_by_id(&self, id: &str) -> PlatformResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn count_users(&self, filter: &UserFilter) -> PlatformResult<u64> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| filter.matches(u)).count() as u64)
    }

    // ==================== Analytics Operations ====================

    async fn insert_snapshot(
        &self,
        snapshot: &PlatformAnalytics,
    ) -> PlatformResult<PlatformAnalytics> {
        let unique_date = self.unique_snapshot_date().await;
        let mut snapshots = self.snapshots.write().await;

        if snapshots.iter().any(|s| s.id == snapshot.id) {
            return Err(PlatformError::duplicate(ANALYTICS_COLLECTION, "id", &snapshot.id));
        }
        if unique_date && snapshots.iter().any(|s| s.date == snapshot.date) {
            return Err(PlatformError::duplicate(
                ANALYTICS_COLLECTION,
                "date",
                snapshot.date.to_rfc3339(),
            ));
        }

        snapshots.push(snapshot.clone());
        Ok(snapshot.clone())
    }

    async fn upsert_snapshot_by_date(
        &self,
        snapshot: &PlatformAnalytics,
    ) -> PlatformResult<PlatformAnalytics> {
        let mut snapshots = self.snapshots.write().await;
        let mut stored = snapshot.clone();

        if let Some(existing) = snapshots.iter().find(|s| s.date == snapshot.date) {
            stored.id = existing.id.clone();
            stored.created_at = existing.created_at;
            stored.updated_at = Utc::now();
        }

        snapshots.retain(|s| s.date != snapshot.date);
        snapshots.push(stored.clone());
        Ok(stored)
    }

    async fn find_snapshots(&self, range: &DateRange) -> PlatformResult<Vec<PlatformAnalytics>> {
        let snapshots = self.snapshots.read().await;
        // Reversed so equal timestamps keep the later insert first.
        let mut found: Vec<_> = snapshots
            .iter()
            .rev()
            .filter(|s| range.contains(s.date))
            .cloned()
            .collect();

        found.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.created_at.cmp(&a.created_at)));
        Ok(found)
    }

    async fn latest_snapshot(&self) -> PlatformResult<Option<PlatformAnalytics>> {
        let snapshots = self.snapshots.read().await;
        Ok(snapshots
            .iter()
            .max_by(|a, b| a.date.cmp(&b.date).then_with(|| a.created_at.cmp(&b.created_at)))
            .cloned())
    }

    // ==================== Schema Operations ====================

    async fn migrate(&self, models: &[ModelDefinition]) -> PlatformResult<()> {
        let mut defined = self.models.write().await;
        for model in models {
            tracing::debug!(
                collection = %model.name,
                indexes = model.indexes.len(),
                "defining collection"
            );
            defined.insert(model.name.clone(), model.clone());
        }
        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> PlatformResult<bool> {
        let defined = self.models.read().await;
        Ok(defined.contains_key(name))
    }

    async fn current_schema(&self) -> PlatformResult<SchemaDefinition> {
        let defined = self.models.read().await;
        let mut schema = SchemaDefinition::new();
        for model in defined.values() {
            schema.add_model(model.clone());
        }
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use shiftdesk_core::schema::platform_schema;
    use shiftdesk_core::types::{ExternalFigures, PlatformCounts, Role};

    fn snapshot_on(day: u32, hour: u32) -> PlatformAnalytics {
        let at = Utc.with_ymd_and_hms(2026, 6, day, hour, 0, 0).unwrap();
        PlatformAnalytics::new(at, PlatformCounts::default(), ExternalFigures::default())
    }

    #[tokio::test]
    async fn test_create_and_get_company() {
        let adapter = MemoryAdapter::new();
        let company = Company::new("c1", "Acme").with_plan("pro");

        adapter.create_company(&company).await.unwrap();
        let fetched = adapter.get_company_by_id("c1").await.unwrap();
        assert_eq!(fetched.unwrap().subscription.plan, "pro");
        assert!(adapter.create_company(&company).await.is_err());
    }

    #[tokio::test]
    async fn test_update_missing_company_fails() {
        let adapter = MemoryAdapter::new();
        let result = adapter.update_company(&Company::new("ghost", "Ghost")).await;
        assert!(matches!(result, Err(PlatformError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let adapter = MemoryAdapter::new();
        adapter
            .create_user(&User::new("u1", "a@x.test", Role::Employee))
            .await
            .unwrap();
        let result = adapter
            .create_user(&User::new("u2", "a@x.test", Role::Admin))
            .await;
        assert!(matches!(result, Err(PlatformError::DuplicateEntry { .. })));
    }

    #[tokio::test]
    async fn test_count_companies_by_plan_groups_raw_labels() {
        let adapter = MemoryAdapter::new();
        for (id, plan) in [("c1", "pro"), ("c2", "pro"), ("c3", "gold")] {
            adapter
                .create_company(&Company::new(id, "Tenant").with_plan(plan))
                .await
                .unwrap();
        }

        let groups = adapter.count_companies_by_plan().await.unwrap();
        assert_eq!(groups, vec![("gold".to_string(), 1), ("pro".to_string(), 2)]);
    }

    #[tokio::test]
    async fn test_list_companies_paginates_oldest_first() {
        let adapter = MemoryAdapter::new();
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        for i in 0..5 {
            let company =
                Company::new(format!("c{i}"), "Tenant").created_at(base + Duration::days(i));
            adapter.create_company(&company).await.unwrap();
        }

        let page = adapter.list_companies(2, 2).await.unwrap();
        let ids: Vec<_> = page.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2", "c3"]);
    }

    #[tokio::test]
    async fn test_snapshots_allow_same_day_without_unique_index() {
        let adapter = MemoryAdapter::new();
        adapter.migrate(&platform_schema(false)).await.unwrap();

        adapter.insert_snapshot(&snapshot_on(3, 8)).await.unwrap();
        adapter.insert_snapshot(&snapshot_on(3, 20)).await.unwrap();
        assert_eq!(adapter.snapshot_count().await, 2);
    }

    #[tokio::test]
    async fn test_unique_date_index_rejects_second_insert() {
        let adapter = MemoryAdapter::new();
        adapter.migrate(&platform_schema(true)).await.unwrap();

        adapter.insert_snapshot(&snapshot_on(3, 8)).await.unwrap();
        let result = adapter.insert_snapshot(&snapshot_on(3, 20)).await;
        assert!(matches!(result, Err(PlatformError::DuplicateEntry { .. })));
    }

    #[tokio::test]
    async fn test_upsert_keeps_identity() {
        let adapter = MemoryAdapter::new();
        let first = adapter.insert_snapshot(&snapshot_on(3, 8)).await.unwrap();

        let mut replacement = snapshot_on(3, 20);
        replacement.total_companies = 9;
        let stored = adapter.upsert_snapshot_by_date(&replacement).await.unwrap();

        assert_eq!(stored.id, first.id);
        assert_eq!(stored.total_companies, 9);
        assert_eq!(adapter.snapshot_count().await, 1);
    }

    #[tokio::test]
    async fn test_find_snapshots_newest_first() {
        let adapter = MemoryAdapter::new();
        for day in [1, 5, 3, 9] {
            adapter.insert_snapshot(&snapshot_on(day, 12)).await.unwrap();
        }

        let range = DateRange::new(
            Utc.with_ymd_and_hms(2026, 6, 2, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 6, 5, 0, 0, 0).unwrap(),
        );
        let found = adapter.find_snapshots(&range).await.unwrap();
        let days: Vec<_> = found.iter().map(|s| s.date.format("%d").to_string()).collect();
        assert_eq!(days, vec!["05", "03"]);
    }

    #[tokio::test]
    async fn test_latest_snapshot_on_empty_store() {
        let adapter = MemoryAdapter::new();
        assert!(adapter.latest_snapshot().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_migrate_records_collections() {
        let adapter = MemoryAdapter::new();
        adapter.migrate(&platform_schema(false)).await.unwrap();
        assert!(adapter.collection_exists(ANALYTICS_COLLECTION).await.unwrap());
        assert!(!adapter.collection_exists("shift").await.unwrap());
        assert_eq!(adapter.current_schema().await.unwrap().models.len(), 3);
    }
}
