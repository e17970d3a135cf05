//! Query extractors for Axum handlers.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use shiftdesk_core::error::PlatformError;
use shiftdesk_core::query::DateRange;

use crate::ApiError;

#[derive(Debug, Deserialize)]
struct RangeParams {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

/// Extractor for an inclusive snapshot date range.
///
/// Reads `start` and `end` as `YYYY-MM-DD` calendar days in UTC. Rejects the
/// request with 422 if either is missing or malformed, or if `end` falls
/// before `start`.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(SnapshotRange(range): SnapshotRange) -> String {
///     format!("{} .. {}", range.start, range.end)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SnapshotRange(pub DateRange);

impl<S> FromRequestParts<S> for SnapshotRange
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<RangeParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| PlatformError::invalid_field("query", rejection.body_text()))?;

        let start = params.start.ok_or_else(|| PlatformError::missing_field("start"))?;
        let end = params.end.ok_or_else(|| PlatformError::missing_field("end"))?;

        let range = DateRange::new(midnight(start), midnight(end));
        if range.is_inverted() {
            return Err(PlatformError::invalid_field("end", "must not be before start").into());
        }
        Ok(Self(range))
    }
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}
