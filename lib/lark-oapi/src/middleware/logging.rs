//! Request/response logging middleware.
//!
//! Logs every exchange with `tracing`: one span per request, a start event
//! and a completion event with the status and elapsed time.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use lark_oapi_core::{Error, Result, request_id_from_headers};
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

/// Layer that adds request/response logging.
///
/// # Example
///
/// ```ignore
/// use lark_oapi::middleware::LoggingLayer;
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(LoggingLayer::new())
///     .service(client);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    verbose: bool,
}

impl LoggingLayer {
    /// Create a new logging layer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that also logs request headers at debug level.
    #[must_use]
    pub const fn debug() -> Self {
        Self { verbose: true }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            verbose: self.verbose,
        }
    }
}

/// Service that logs requests and responses.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    verbose: bool,
}

impl<S> Logging<S> {
    /// Create a new logging service wrapping the given service.
    pub const fn new(inner: S) -> Self {
        Self {
            inner,
            verbose: false,
        }
    }
}

impl<S> Service<http::Request<Bytes>> for Logging<S>
where
    S: Service<http::Request<Bytes>, Response = http::Response<Bytes>, Error = Error>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = http::Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: http::Request<Bytes>) -> Self::Future {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let verbose = self.verbose;

        let span = span!(Level::INFO, "http_request", %method, %uri);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();

                if verbose {
                    debug!(
                        method = %method,
                        uri = %uri,
                        headers = ?request.headers(),
                        "sending request"
                    );
                } else {
                    info!(method = %method, uri = %uri, "sending request");
                }

                let result = inner.call(request).await;

                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) => {
                        let status = response.status().as_u16();
                        let request_id = request_id_from_headers(response.headers());
                        if response.status().is_success() {
                            info!(status, request_id, elapsed_ms, "request completed");
                        } else {
                            warn!(status, request_id, elapsed_ms, "request failed with HTTP error");
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, elapsed_ms, "request failed");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}
