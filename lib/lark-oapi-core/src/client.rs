//! HTTP client trait.
//!
//! [`HttpClient`] is the seam between the SDK and the network: the transport
//! hands it a fully built request and gets back the buffered response.
//! Implement it to plug in another HTTP stack or a test double.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::Result;

/// Executes one HTTP exchange.
///
/// Implementations classify their failures so the retry loop can act on
/// them:
/// - [`crate::Error::DialFailed`] when no connection could be established
/// - [`crate::Error::ClientTimeout`] when the deadline was exceeded
/// - [`crate::Error::Transport`] for anything else
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the buffered response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained.
    fn execute(
        &self,
        request: http::Request<Bytes>,
    ) -> impl Future<Output = Result<http::Response<Bytes>>> + Send;
}

impl<T: HttpClient> HttpClient for Arc<T> {
    fn execute(
        &self,
        request: http::Request<Bytes>,
    ) -> impl Future<Output = Result<http::Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}
