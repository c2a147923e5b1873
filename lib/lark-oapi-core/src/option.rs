//! Per-call request options and authentication modes.

use derive_more::Display;

use crate::headers;

/// Authentication mode of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AccessTokenType {
    /// No `Authorization` header.
    #[display("none_access_token")]
    None,
    /// App access token.
    #[display("app_access_token")]
    App,
    /// Tenant access token.
    #[display("tenant_access_token")]
    Tenant,
    /// User access token.
    #[display("user_access_token")]
    User,
    /// Personal access token.
    #[display("personal_access_token")]
    Personal,
}

/// Options for a single call: extra headers, tokens and download flags.
///
/// # Example
///
/// ```
/// use lark_oapi_core::{AccessTokenType, RequestOption};
///
/// let option = RequestOption::new()
///     .tenant_access_token("t-123")
///     .header("X-Custom", "1");
///
/// assert_eq!(option.resolve_token_type(), AccessTokenType::Tenant);
/// assert_eq!(option.access_token(AccessTokenType::Tenant), "t-123");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOption {
    headers: Vec<(String, String)>,
    user_access_token: Option<String>,
    tenant_access_token: Option<String>,
    app_access_token: Option<String>,
    personal_access_token: Option<String>,
    request_id: Option<String>,
    file_upload: bool,
    file_download: bool,
}

impl RequestOption {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header. Repeated names send repeated values.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Authenticate with a user access token.
    #[must_use]
    pub fn user_access_token(mut self, token: impl Into<String>) -> Self {
        self.user_access_token = Some(token.into());
        self
    }

    /// Authenticate with a tenant access token.
    #[must_use]
    pub fn tenant_access_token(mut self, token: impl Into<String>) -> Self {
        self.tenant_access_token = Some(token.into());
        self
    }

    /// Authenticate with an app access token.
    #[must_use]
    pub fn app_access_token(mut self, token: impl Into<String>) -> Self {
        self.app_access_token = Some(token.into());
        self
    }

    /// Authenticate with a personal access token.
    #[must_use]
    pub fn personal_access_token(mut self, token: impl Into<String>) -> Self {
        self.personal_access_token = Some(token.into());
        self
    }

    /// Sends `X-Request-Id` with the given value.
    #[must_use]
    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Marks the call as a file upload.
    #[must_use]
    pub const fn file_upload(mut self) -> Self {
        self.file_upload = true;
        self
    }

    /// Marks the call as a file download: a `200` answer is returned
    /// as-is, whatever its content type.
    #[must_use]
    pub const fn file_download(mut self) -> Self {
        self.file_download = true;
        self
    }

    /// Caller headers.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Request id to send, if any.
    #[must_use]
    pub fn get_request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Whether the call uploads a file.
    #[must_use]
    pub const fn is_file_upload(&self) -> bool {
        self.file_upload
    }

    /// Whether the call downloads a file.
    #[must_use]
    pub const fn is_file_download(&self) -> bool {
        self.file_download
    }

    /// First reserved header name found among the caller headers.
    #[must_use]
    pub fn reserved_header(&self) -> Option<&'static str> {
        headers::RESERVED.into_iter().find(|reserved| {
            self.headers
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case(reserved))
        })
    }

    /// Authentication mode implied by the non-empty tokens:
    /// user, then tenant, then app, otherwise personal.
    #[must_use]
    pub fn resolve_token_type(&self) -> AccessTokenType {
        let is_set = |token: Option<&str>| token.is_some_and(|t| !t.is_empty());

        if is_set(self.user_access_token.as_deref()) {
            AccessTokenType::User
        } else if is_set(self.tenant_access_token.as_deref()) {
            AccessTokenType::Tenant
        } else if is_set(self.app_access_token.as_deref()) {
            AccessTokenType::App
        } else {
            AccessTokenType::Personal
        }
    }

    /// Token for `token_type`, `""` when not set.
    #[must_use]
    pub fn access_token(&self, token_type: AccessTokenType) -> &str {
        let token = match token_type {
            AccessTokenType::None => None,
            AccessTokenType::App => self.app_access_token.as_deref(),
            AccessTokenType::Tenant => self.tenant_access_token.as_deref(),
            AccessTokenType::User => self.user_access_token.as_deref(),
            AccessTokenType::Personal => self.personal_access_token.as_deref(),
        };
        token.unwrap_or_default()
    }
}
