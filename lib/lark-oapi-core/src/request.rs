//! API call descriptors.
//!
//! Use [`ApiRequest::builder`] to describe a call: method, path template,
//! parameters, body and accepted authentication modes.
//!
//! # Example
//!
//! ```
//! use lark_oapi_core::{AccessTokenType, ApiRequest, Method};
//!
//! let request = ApiRequest::builder(Method::GET, "/open-apis/im/v1/chats/:chat_id")
//!     .path_param("chat_id", "oc_123")
//!     .query_param("user_id_type", "open_id")
//!     .supported_token_types([AccessTokenType::Tenant, AccessTokenType::User])
//!     .build();
//!
//! assert_eq!(request.path_params().get("chat_id"), "oc_123");
//! ```

use http::Method;

use crate::{AccessTokenType, FormData, PathParams, PathTemplate, QueryParams};

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// JSON document.
    Json(serde_json::Value),
    /// Multipart form.
    FormData(FormData),
}

/// Description of one API call. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: PathTemplate,
    body: Option<Body>,
    path_params: PathParams,
    query_params: QueryParams,
    supported_token_types: Vec<AccessTokenType>,
}

impl ApiRequest {
    /// Creates a new [`ApiRequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, path: impl Into<PathTemplate>) -> ApiRequestBuilder {
        ApiRequestBuilder::new(method, path)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// API path template.
    #[must_use]
    pub const fn path(&self) -> &PathTemplate {
        &self.path
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Path parameters.
    #[must_use]
    pub const fn path_params(&self) -> &PathParams {
        &self.path_params
    }

    /// Query parameters.
    #[must_use]
    pub const fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    /// Accepted authentication modes; empty accepts any.
    #[must_use]
    pub fn supported_token_types(&self) -> &[AccessTokenType] {
        &self.supported_token_types
    }

    /// Whether `token_type` may be used for this call.
    #[must_use]
    pub fn supports(&self, token_type: AccessTokenType) -> bool {
        self.supported_token_types.is_empty() || self.supported_token_types.contains(&token_type)
    }
}

/// Builder for [`ApiRequest`].
#[derive(Debug, Clone)]
pub struct ApiRequestBuilder {
    method: Method,
    path: PathTemplate,
    body: Option<Body>,
    path_params: PathParams,
    query_params: QueryParams,
    supported_token_types: Vec<AccessTokenType>,
}

impl ApiRequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, path: impl Into<PathTemplate>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            path_params: PathParams::new(),
            query_params: QueryParams::new(),
            supported_token_types: Vec::new(),
        }
    }

    /// Sets a path parameter.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.path_params.set(name, value.to_string());
        self
    }

    /// Appends a query parameter value.
    #[must_use]
    pub fn query_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query_params.add(name, value.to_string());
        self
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn query_params(mut self, params: QueryParams) -> Self {
        self.query_params = params;
        self
    }

    /// Replaces all path parameters.
    #[must_use]
    pub fn path_params(mut self, params: PathParams) -> Self {
        self.path_params = params;
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a multipart body.
    #[must_use]
    pub fn form_data(self, form: FormData) -> Self {
        self.body(Body::FormData(form))
    }

    /// Sets a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as JSON.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let value = serde_json::to_value(value)?;
        Ok(self.body(Body::Json(value)))
    }

    /// Declares the accepted authentication modes.
    #[must_use]
    pub fn supported_token_types(
        mut self,
        token_types: impl IntoIterator<Item = AccessTokenType>,
    ) -> Self {
        self.supported_token_types = token_types.into_iter().collect();
        self
    }

    /// Builds the [`ApiRequest`].
    #[must_use]
    pub fn build(self) -> ApiRequest {
        ApiRequest {
            method: self.method,
            path: self.path,
            body: self.body,
            path_params: self.path_params,
            query_params: self.query_params,
            supported_token_types: self.supported_token_types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_request_builder_basic() {
        let request = ApiRequest::builder(Method::POST, "/open-apis/im/v1/messages")
            .query_param("receive_id_type", "chat_id")
            .supported_token_types([AccessTokenType::Tenant])
            .build();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.path().as_str(), "/open-apis/im/v1/messages");
        assert_eq!(request.query_params().get("receive_id_type"), "chat_id");
        assert!(request.body().is_none());
        assert!(request.supports(AccessTokenType::Tenant));
        assert!(!request.supports(AccessTokenType::User));
    }

    #[test]
    fn api_request_supports_any_when_unspecified() {
        let request = ApiRequest::builder(Method::GET, "/x").build();
        assert!(request.supports(AccessTokenType::Personal));
        assert!(request.supports(AccessTokenType::None));
    }

    #[test]
    fn api_request_builder_json() {
        #[derive(serde::Serialize)]
        struct Message {
            receive_id: String,
            msg_type: String,
        }

        let request = ApiRequest::builder(Method::POST, "/open-apis/im/v1/messages")
            .json(&Message {
                receive_id: "oc_1".to_string(),
                msg_type: "text".to_string(),
            })
            .expect("json")
            .build();

        assert_eq!(
            request.body(),
            Some(&Body::Json(serde_json::json!({
                "receive_id": "oc_1",
                "msg_type": "text",
            })))
        );
    }

    #[test]
    fn api_request_builder_params() {
        let request = ApiRequest::builder(Method::GET, "/chats/:chat_id")
            .path_param("chat_id", 42)
            .query_param("page_size", 20)
            .query_param("page_size", 50)
            .build();

        assert_eq!(request.path_params().get("chat_id"), "42");
        assert_eq!(request.query_params().get_all("page_size"), ["20", "50"]);
    }

    #[test]
    fn api_request_builder_form_data() {
        let form = FormData::new().add_field("image_type", "message");
        let request = ApiRequest::builder(Method::POST, "/open-apis/im/v1/images")
            .form_data(form.clone())
            .build();

        assert_eq!(request.body(), Some(&Body::FormData(form)));
    }
}
