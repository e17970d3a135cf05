//! # Shiftdesk
//!
//! Cross-tenant platform analytics for the Shiftdesk workforce platform.
//!
//! Shiftdesk takes a daily snapshot of the whole platform (tenants, staff by
//! role, subscription mix, growth this month) and serves the history to the
//! platform admin.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shiftdesk::prelude::*;
//! use shiftdesk_adapter_memory::MemoryAdapter;
//!
//! #[tokio::main]
//! async fn main() -> PlatformResult<()> {
//!     let analytics = AnalyticsService::new(Arc::new(MemoryAdapter::new()));
//!     analytics.migrate().await?;
//!
//!     let snapshot = analytics.create_daily_snapshot().await?;
//!     let latest = analytics.get_latest_analytics().await?;
//!
//!     Ok(())
//! }
//! ```

// Re-export core types
pub use shiftdesk_core::*;

/// Snapshot aggregation and queries.
pub mod analytics {
    pub use shiftdesk_analytics::*;
}

/// Platform admin API.
pub mod admin {
    pub use shiftdesk_admin::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use shiftdesk_admin::{AdminApi, AdminConfig, AnalyticsDashboard, PlatformStats};
    pub use shiftdesk_analytics::{AnalyticsService, ExternalMetrics, SnapshotPolicy};
    pub use shiftdesk_core::error::{PlatformError, PlatformResult};
    pub use shiftdesk_core::traits::StorageAdapter;
    pub use shiftdesk_core::types::{Company, PlatformAnalytics, Role, SubscriptionBreakdown, User};
    pub use std::sync::Arc;
}
