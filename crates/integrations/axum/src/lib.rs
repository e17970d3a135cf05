//! # Shiftdesk Axum Integration
//!
//! This crate exposes platform analytics and the admin API over HTTP:
//! - Route mounting
//! - Request logging middleware
//! - Query extractors
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shiftdesk_axum::{platform_routes, RequestLogLayer};
//!
//! let app = platform_routes(Arc::new(admin_api)).layer(RequestLogLayer::new());
//! axum::serve(listener, app).await?;
//! ```

mod extractor;
mod layer;
mod routes;

pub use extractor::SnapshotRange;
pub use layer::RequestLogLayer;
pub use routes::{admin_routes, analytics_routes, platform_routes};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shiftdesk_core::error::PlatformError;

/// Wrapper for `PlatformError` that implements `IntoResponse`.
///
/// Renders as `{"error": <message>, "code": <status>}`.
#[derive(Debug)]
pub struct ApiError(pub PlatformError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = serde_json::json!({
            "error": self.0.to_string(),
            "code": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<PlatformError> for ApiError {
    fn from(err: PlatformError) -> Self {
        ApiError(err)
    }
}
