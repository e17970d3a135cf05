//! Route mounting for analytics and admin routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use shiftdesk_admin::{AdminApi, AnalyticsDashboard, CompanyListResponse, PlatformStats};
use shiftdesk_core::types::{Company, PlatformAnalytics};
use std::sync::Arc;

use crate::extractor::SnapshotRange;
use crate::ApiError;

type ApiResult<T> = Result<T, ApiError>;

/// Creates the full router: analytics routes under `/analytics` and, when
/// enabled, admin routes under the configured admin path.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new().nest("/api", platform_routes(api));
/// ```
pub fn platform_routes<S>(api: Arc<AdminApi>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let router = Router::new().nest("/analytics", analytics_routes(api.clone()));
    if api.config().enabled {
        let path = api.config().path.clone();
        router.nest(&path, admin_routes(api))
    } else {
        router
    }
}

/// Creates a router with the snapshot and dashboard routes.
pub fn analytics_routes<S>(api: Arc<AdminApi>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/snapshots", get(list_snapshots).post(create_snapshot))
        .route("/snapshots/latest", get(latest_snapshot))
        .route("/dashboard", get(dashboard))
        .with_state(api)
}

/// Creates a router with the platform admin routes.
pub fn admin_routes<S>(api: Arc<AdminApi>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/stats", get(stats))
        .route("/companies", get(list_companies))
        .route("/companies/{id}", get(get_company))
        .route("/companies/{id}/status", put(set_company_status))
        .with_state(api)
}

// ==================== Analytics ====================

async fn create_snapshot(
    State(api): State<Arc<AdminApi>>,
) -> ApiResult<(StatusCode, Json<PlatformAnalytics>)> {
    let snapshot = api.analytics().create_daily_snapshot().await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

async fn list_snapshots(
    State(api): State<Arc<AdminApi>>,
    SnapshotRange(range): SnapshotRange,
) -> ApiResult<Json<Vec<PlatformAnalytics>>> {
    let snapshots = api
        .analytics()
        .get_analytics_by_date_range(range.start, range.end)
        .await?;
    Ok(Json(snapshots))
}

async fn latest_snapshot(
    State(api): State<Arc<AdminApi>>,
) -> ApiResult<Json<Option<PlatformAnalytics>>> {
    Ok(Json(api.analytics().get_latest_analytics().await?))
}

#[derive(Debug, Deserialize)]
struct DashboardParams {
    #[serde(default)]
    days: u32,
}

async fn dashboard(
    State(api): State<Arc<AdminApi>>,
    Query(params): Query<DashboardParams>,
) -> ApiResult<Json<AnalyticsDashboard>> {
    Ok(Json(api.dashboard(params.days, Utc::now()).await?))
}

// ==================== Admin ====================

#[derive(Debug, Deserialize)]
struct PageParams {
    #[serde(default)]
    page: usize,
    per_page: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    is_active: bool,
}

async fn stats(State(api): State<Arc<AdminApi>>) -> ApiResult<Json<PlatformStats>> {
    Ok(Json(api.stats().await?))
}

async fn list_companies(
    State(api): State<Arc<AdminApi>>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<CompanyListResponse>> {
    let per_page = params.per_page.unwrap_or(DEFAULT_PAGE_SIZE);
    Ok(Json(api.list_companies(params.page, per_page).await?))
}

async fn get_company(
    State(api): State<Arc<AdminApi>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Company>> {
    Ok(Json(api.get_company(&id).await?))
}

async fn set_company_status(
    State(api): State<Arc<AdminApi>>,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> ApiResult<Json<Company>> {
    Ok(Json(api.set_company_active(&id, body.is_active).await?))
}

const DEFAULT_PAGE_SIZE: usize = 20;
