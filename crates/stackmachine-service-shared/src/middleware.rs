//! Request tracking middleware.
//!
//! [`RequestLayer`] gives every request a correlation ID and records HTTP
//! metrics around it:
//!
//! - the `X-Request-ID` header is reused when present, otherwise a UUID v7 is
//!   generated and written into the request headers so handlers can read it
//!   with [`extract_or_generate_request_id`]
//! - the same ID is echoed on the response
//! - an `info_span!("request")` carrying the ID wraps the inner service
//! - `http_requests_total`, `http_request_duration_seconds`,
//!   `http_request_size_bytes` and `http_response_size_bytes` are recorded

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{info_span, Span};
use uuid::Uuid;

/// Correlation header name.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request correlation ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new time-sortable UUID v7 ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Read `X-Request-ID` (case-insensitive), or generate a UUID v7 when it is
/// missing, empty or not valid UTF-8.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(RequestId::from)
        .unwrap_or_else(RequestId::generate)
}

/// Strip the query string so metric labels stay low-cardinality.
pub fn normalize_path(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

fn status_bucket(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

fn content_length(headers: &HeaderMap) -> Option<f64> {
    headers
        .get(axum::http::header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Tower layer adding request IDs, a request span and HTTP metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLayer;

impl<S> Layer<S> for RequestLayer {
    type Service = RequestService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct RequestService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = RequestFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = normalize_path(req.uri().path()).to_string();

        if let Some(size) = content_length(req.headers()) {
            metrics::histogram!(
                "http_request_size_bytes",
                "method" => method.clone(),
                "path" => path.clone()
            )
            .record(size);
        }

        let request_id = extract_or_generate_request_id(req.headers());
        let header_value = HeaderValue::from_str(request_id.as_str()).ok();
        if let Some(value) = &header_value {
            req.headers_mut().insert(X_REQUEST_ID.clone(), value.clone());
        }

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %path,
        );
        span.in_scope(|| tracing::info!("handling request"));

        let future = span.in_scope(|| self.inner.call(req));

        RequestFuture {
            inner: future,
            start,
            method,
            path,
            header_value,
            span,
        }
    }
}

pin_project! {
    /// Future recording metrics and echoing the request ID on completion.
    pub struct RequestFuture<F> {
        #[pin]
        inner: F,
        start: Instant,
        method: String,
        path: String,
        header_value: Option<HeaderValue>,
        span: Span,
    }
}

impl<F, ResBody, E> Future for RequestFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _enter = this.span.enter();

        let mut result = match this.inner.poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(result) => result,
        };

        let duration_secs = this.start.elapsed().as_secs_f64();
        let latency_ms = duration_secs * 1000.0;

        let status_label = match &mut result {
            Ok(response) => {
                if let Some(value) = this.header_value.take() {
                    response.headers_mut().insert(X_REQUEST_ID.clone(), value);
                }
                if let Some(size) = content_length(response.headers()) {
                    metrics::histogram!(
                        "http_response_size_bytes",
                        "method" => this.method.clone(),
                        "path" => this.path.clone()
                    )
                    .record(size);
                }

                let status = response.status().as_u16();
                tracing::info!(status, latency_ms, "request completed");
                status_bucket(status)
            }
            Err(_) => {
                tracing::error!(latency_ms, "request failed");
                "5xx"
            }
        };

        metrics::counter!(
            "http_requests_total",
            "method" => this.method.clone(),
            "path" => this.path.clone(),
            "status" => status_label
        )
        .increment(1);
        metrics::histogram!(
            "http_request_duration_seconds",
            "method" => this.method.clone(),
            "path" => this.path.clone()
        )
        .record(duration_secs);

        Poll::Ready(result)
    }
}
