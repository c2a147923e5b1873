//! Response wrapper.
//!
//! [`ApiResponse`] keeps the status, the header multimap and the raw body of
//! a completed exchange, and decodes JSON on demand.
//!
//! # Example
//!
//! ```ignore
//! let chat: ChatResponse = response.decode_json(&config.serializer)?;
//! ```

use std::fmt;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use percent_encoding::percent_decode_str;

use crate::{ContentType, Serialization, headers};

/// Destination for [`ApiResponse::write_to`].
///
/// Receives the status first, then every header value, then the body.
pub trait ResponseSink {
    /// Set the status code.
    fn write_status(&mut self, status: StatusCode);

    /// Append one header value.
    fn append_header(&mut self, name: &HeaderName, value: &HeaderValue);

    /// Write a chunk of body.
    fn write_body(&mut self, chunk: &[u8]);
}

impl ResponseSink for http::Response<Vec<u8>> {
    fn write_status(&mut self, status: StatusCode) {
        *self.status_mut() = status;
    }

    fn append_header(&mut self, name: &HeaderName, value: &HeaderValue) {
        self.headers_mut().append(name.clone(), value.clone());
    }

    fn write_body(&mut self, chunk: &[u8]) {
        self.body_mut().extend_from_slice(chunk);
    }
}

/// Status, headers and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    /// Creates a new response.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// HTTP status as [`StatusCode`].
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Raw response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
        (self.status, self.headers, self.body)
    }

    /// Status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// `Content-Type` header, `""` when absent.
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.header(header::CONTENT_TYPE.as_str()).unwrap_or_default()
    }

    /// Whether the body is declared as JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        ContentType::is_json(self.content_type())
    }

    /// Correlation id: `X-Tt-Logid`, then `X-Request-Id`, else `""`.
    #[must_use]
    pub fn request_id(&self) -> &str {
        request_id_from_headers(&self.headers)
    }

    /// File name announced in `Content-Disposition`, `""` when absent.
    #[must_use]
    pub fn file_name(&self) -> String {
        file_name_from_headers(&self.headers)
    }

    /// Deserialize the body with the given serializer.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the body is not valid JSON for `T`.
    pub fn decode_json<T, S>(&self, serializer: &S) -> crate::Result<T>
    where
        T: serde::de::DeserializeOwned,
        S: Serialization,
    {
        serializer.deserialize(&self.body)
    }

    /// Deserialize the body with `serde_json`.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the body is not valid JSON for `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_json(&self.body)
    }

    /// Get the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Write status, headers and body to `sink`, in that order.
    pub fn write_to<W: ResponseSink + ?Sized>(&self, sink: &mut W) {
        sink.write_status(self.status);
        for (name, value) in &self.headers {
            sink.append_header(name, value);
        }
        sink.write_body(&self.body);
    }
}

impl From<http::Response<Bytes>> for ApiResponse {
    fn from(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self::new(parts.status, parts.headers, body)
    }
}

impl From<ApiResponse> for http::Response<Bytes> {
    fn from(response: ApiResponse) -> Self {
        let mut out = Self::new(response.body);
        *out.status_mut() = response.status;
        *out.headers_mut() = response.headers;
        out
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatusCode: {}, Header:{{", self.status.as_u16())?;
        for (i, name) in self.headers.keys().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let values: Vec<_> = self
                .headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()))
                .collect();
            write!(f, "{name}: [{}]", values.join(" "))?;
        }
        write!(f, "}}, Content-Type: {}, Body: ", self.content_type())?;

        if self.is_json() {
            f.write_str(&String::from_utf8_lossy(&self.body))
        } else {
            write!(f, "<binary> len {}", self.body.len())
        }
    }
}

/// Correlation id in a header map: `X-Tt-Logid`, then `X-Request-Id`.
#[must_use]
pub fn request_id_from_headers(headers: &HeaderMap) -> &str {
    [headers::X_TT_LOGID, headers::X_REQUEST_ID]
        .into_iter()
        .filter_map(|name| headers.get(name).and_then(|v| v.to_str().ok()))
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}

/// File name from a `Content-Disposition` header.
///
/// Prefers the RFC 5987 `filename*` parameter over `filename`.
#[must_use]
pub fn file_name_from_headers(headers: &HeaderMap) -> String {
    let Some(disposition) = headers
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
    else {
        return String::new();
    };

    let mut plain = None;
    for param in disposition.split(';').skip(1) {
        let Some((name, value)) = param.trim().split_once('=') else {
            continue;
        };
        let value = value.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                // charset'language'percent-encoded
                let encoded = value.rsplit('\'').next().unwrap_or(value);
                return percent_decode_str(encoded).decode_utf8_lossy().into_owned();
            }
            "filename" => plain = Some(value.trim_matches('"').to_string()),
            _ => {}
        }
    }

    plain.unwrap_or_default()
}
