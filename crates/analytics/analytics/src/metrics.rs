//! Sources for the figures the platform collections cannot provide.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shiftdesk_core::error::PlatformResult;
use shiftdesk_core::types::ExternalFigures;

/// Supplies revenue, churn and health figures for a snapshot.
///
/// Billing and monitoring integrations implement this; the aggregator only
/// copies what it is given.
#[async_trait]
pub trait ExternalMetrics: Send + Sync {
    /// Returns the figures to record for a snapshot taken at `at`.
    async fn figures(&self, at: DateTime<Utc>) -> PlatformResult<ExternalFigures>;
}

/// Zero revenue and churn, healthy status.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExternalMetrics;

#[async_trait]
impl ExternalMetrics for NoExternalMetrics {
    async fn figures(&self, _at: DateTime<Utc>) -> PlatformResult<ExternalFigures> {
        Ok(ExternalFigures::default())
    }
}

/// Always returns the same figures.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedMetrics(pub ExternalFigures);

#[async_trait]
impl ExternalMetrics for FixedMetrics {
    async fn figures(&self, _at: DateTime<Utc>) -> PlatformResult<ExternalFigures> {
        Ok(self.0)
    }
}
