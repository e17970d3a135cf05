//! Core traits for Shiftdesk.
//!
//! This module defines the storage seam. Adapters implement
//! [`StorageAdapter`] to expose the document-store capabilities the
//! analytics and admin layers rely on: equality and range filters, grouped
//! counts, and snapshot persistence.

use async_trait::async_trait;

use crate::error::PlatformResult;
use crate::query::{CompanyFilter, DateRange, UserFilter};
use crate::schema::{ModelDefinition, SchemaDefinition};
use crate::types::{Company, PlatformAnalytics, User};

/// Trait for storage adapters (database backends).
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    // ==================== Company Operations ====================

    /// Creates a new company.
    async fn create_company(&self, company: &Company) -> PlatformResult<Company>;

    /// Gets a company by ID.
    async fn get_company_by_id(&self, id: &str) -> PlatformResult<Option<Company>>;

    /// Updates an existing company.
    async fn update_company(&self, company: &Company) -> PlatformResult<Company>;

    /// Lists companies with pagination, oldest first.
    async fn list_companies(&self, offset: usize, limit: usize) -> PlatformResult<Vec<Company>>;

    /// Counts companies matching the filter.
    async fn count_companies(&self, filter: &CompanyFilter) -> PlatformResult<u64>;

    /// Counts companies grouped by the raw `subscription.plan` label.
    async fn count_companies_by_plan(&self) -> PlatformResult<Vec<(String, u64)>>;

    // ==================== User Operations ====================

    /// Creates a new user.
    async fn create_user(&self, user: &User) -> PlatformResult<User>;

    /// Gets a user by ID.
    async fn get_user_by_id(&self, id: &str) -> PlatformResult<Option<User>>;

    /// Counts users matching the filter.
    async fn count_users(&self, filter: &UserFilter) -> PlatformResult<u64>;

    // ==================== Analytics Operations ====================

    /// Inserts a new snapshot.
    async fn insert_snapshot(
        &self,
        snapshot: &PlatformAnalytics,
    ) -> PlatformResult<PlatformAnalytics>;

    /// Replaces the snapshot(s) sharing `snapshot.date`, or inserts it.
    ///
    /// The stored record keeps the `id` and `created_at` of the record it
    /// replaces.
    async fn upsert_snapshot_by_date(
        &self,
        snapshot: &PlatformAnalytics,
    ) -> PlatformResult<PlatformAnalytics>;

    /// Returns snapshots whose date lies in the range, newest first.
    async fn find_snapshots(&self, range: &DateRange) -> PlatformResult<Vec<PlatformAnalytics>>;

    /// Returns the snapshot with the greatest date.
    async fn latest_snapshot(&self) -> PlatformResult<Option<PlatformAnalytics>>;

    // ==================== Schema Operations ====================

    /// Creates collections and indexes.
    async fn migrate(&self, models: &[ModelDefinition]) -> PlatformResult<()>;

    /// Checks if a collection exists.
    async fn collection_exists(&self, name: &str) -> PlatformResult<bool>;

    /// Gets the current schema from the store.
    async fn current_schema(&self) -> PlatformResult<SchemaDefinition> {
        Ok(SchemaDefinition::new())
    }
}
