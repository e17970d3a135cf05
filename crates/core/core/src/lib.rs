//! # Shiftdesk Core
//!
//! This crate provides the foundational types and traits for the Shiftdesk
//! platform backend. It defines the tenant and user records, the daily
//! analytics snapshot, error types, query filters, and the storage trait that
//! adapters implement.

pub mod error;
pub mod query;
pub mod schema;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{PlatformError, PlatformResult};
pub use query::{CompanyFilter, DateRange, UserFilter};
pub use schema::{
    platform_schema, Field, FieldType, IndexDefinition, ModelDefinition, SchemaDefinition,
    ANALYTICS_COLLECTION, COMPANY_COLLECTION, USER_COLLECTION,
};
pub use traits::StorageAdapter;
pub use types::{
    start_of_day, start_of_month, Company, ExternalFigures, HealthMetrics, PlanTier,
    PlatformAnalytics, PlatformCounts, Revenue, Role, ServerStatus, Subscription,
    SubscriptionBreakdown, User,
};
