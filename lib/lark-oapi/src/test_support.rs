//! Test doubles shared by the unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode};
use lark_oapi_core::{HttpClient, Logger, Result};

use crate::Config;

type Responder = Box<dyn Fn(usize) -> Result<http::Response<Bytes>> + Send + Sync>;

/// Scripted [`HttpClient`]: answers through a closure of the attempt index
/// and records every request it sees.
pub(crate) struct MockClient {
    responder: Responder,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, HeaderMap)>>,
}

impl MockClient {
    pub(crate) fn new(
        responder: impl Fn(usize) -> Result<http::Response<Bytes>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn ok(body: &'static str) -> Self {
        Self::respond(StatusCode::OK, &[], body)
    }

    pub(crate) fn json(status: StatusCode, body: &'static str) -> Self {
        Self::respond(status, &[("Content-Type", "application/json; charset=utf-8")], body)
    }

    pub(crate) fn respond(
        status: StatusCode,
        headers: &[(&'static str, &'static str)],
        body: &'static str,
    ) -> Self {
        let headers = headers.to_vec();
        Self::new(move |_| Ok(response(status, &headers, body)))
    }

    pub(crate) fn fail(error: impl Fn() -> lark_oapi_core::Error + Send + Sync + 'static) -> Self {
        Self::new(move |_| Err(error()))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn seen(&self) -> Vec<(String, HeaderMap)> {
        self.seen.lock().expect("lock").clone()
    }
}

impl HttpClient for MockClient {
    async fn execute(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let attempt = self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .expect("lock")
            .push((request.uri().to_string(), request.headers().clone()));
        (self.responder)(attempt)
    }
}

pub(crate) fn response(
    status: StatusCode,
    headers: &[(&'static str, &'static str)],
    body: &'static str,
) -> http::Response<Bytes> {
    let mut response = http::Response::new(Bytes::from_static(body.as_bytes()));
    *response.status_mut() = status;
    for (name, value) in headers {
        response
            .headers_mut()
            .append(*name, HeaderValue::from_static(*value));
    }
    response
}

pub(crate) fn config<C: HttpClient>(client: C) -> Config<C> {
    Config::builder().build_with_client(client)
}

/// [`Logger`] keeping every line as `"<level>: <message>"`.
#[derive(Default)]
pub(crate) struct Recorder(Mutex<Vec<String>>);

impl Recorder {
    fn push(&self, level: &str, message: &str) {
        self.0
            .lock()
            .expect("lock")
            .push(format!("{level}: {message}"));
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.0.lock().expect("lock").clone()
    }
}

impl Logger for Recorder {
    fn debug(&self, message: &str) {
        self.push("debug", message);
    }

    fn info(&self, message: &str) {
        self.push("info", message);
    }

    fn warn(&self, message: &str) {
        self.push("warn", message);
    }

    fn error(&self, message: &str) {
        self.push("error", message);
    }
}
