//! Request logging middleware layer for Axum.

use axum::body::Body;
use http::{Request, Response};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};

/// Layer that logs each request with its status and latency.
#[derive(Debug, Clone, Default)]
pub struct RequestLogLayer {
    _priv: (),
}

impl RequestLogLayer {
    /// Creates a new request log layer.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> Layer<S> for RequestLogLayer {
    type Service = RequestLog<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLog { inner }
    }
}

/// Middleware service produced by [`RequestLogLayer`].
#[derive(Debug, Clone)]
pub struct RequestLog<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestLog<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        // Take the service that was driven to readiness, leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let started = Instant::now();

        Box::pin(async move {
            let response = inner.call(req).await?;
            let status = response.status();
            let elapsed_ms = started.elapsed().as_millis() as u64;

            if status.is_server_error() {
                tracing::warn!(%method, %path, status = status.as_u16(), elapsed_ms, "request");
            } else {
                tracing::debug!(%method, %path, status = status.as_u16(), elapsed_ms, "request");
            }
            Ok(response)
        })
    }
}
