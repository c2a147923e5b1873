//! Well-known header names.

/// Correlation id assigned by the gateway.
pub const X_TT_LOGID: &str = "X-Tt-Logid";

/// Request id, either echoed by the server or set from [`crate::RequestOption`].
pub const X_REQUEST_ID: &str = "X-Request-Id";

/// Legacy request id header.
pub const REQUEST_ID: &str = "Request-Id";

/// Headers callers may not set through [`crate::RequestOption::header`].
pub const RESERVED: [&str; 3] = [X_REQUEST_ID, REQUEST_ID, X_TT_LOGID];

/// `User-Agent` value sent with every request.
pub const USER_AGENT: &str = concat!("oapi-sdk-rust/", env!("CARGO_PKG_VERSION"));
