//! Request pipeline for the Lark / Feishu open platform.
//!
//! Describe a call with an [`ApiRequest`], pick the credentials with a
//! [`RequestOption`], and run it through [`request()`] with a [`Config`].
//! The pipeline validates the options, translates the call into an HTTP
//! request, sends it through the configured [`HttpClient`] (retrying once
//! when the connection cannot be established) and checks the answer for a
//! business error.
//!
//! # Example
//!
//! ```ignore
//! use lark_oapi::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! struct ChatResponse {
//!     code: i64,
//!     data: Chat,
//! }
//!
//! let config = Config::builder().build();
//! let req = ApiRequest::builder(Method::GET, "/open-apis/im/v1/chats/:chat_id")
//!     .path_param("chat_id", "oc_123")
//!     .supported_token_types([AccessTokenType::Tenant])
//!     .build();
//!
//! let response = lark_oapi::request(
//!     &req,
//!     &config,
//!     &RequestOption::new().tenant_access_token("t-xxx"),
//! )
//! .await?;
//! let chat: ChatResponse = response.decode_json(config.serializer())?;
//! ```

mod client;
mod config;
mod connector;
pub mod middleware;
mod pipeline;
pub mod prelude;
#[cfg(test)]
mod test_support;
mod translator;
mod transport;

// Re-export client types
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{
    ClientConfig, ClientConfigBuilder, Config, ConfigBuilder, FEISHU_BASE_URL, LARK_BASE_URL,
};
pub use connector::https_connector;

// Pipeline
pub use pipeline::{MAX_ATTEMPTS, do_request, request, validate};
pub use translator::ReqTranslator;
pub use transport::send;

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use lark_oapi_core::{
    AccessTokenType, ApiRequest, ApiRequestBuilder, ApiResponse, Body, CodeError, CodeErrorDetail,
    CodeErrorDetails, CodeErrorFieldViolation, CodeErrorPermissionViolation, ContentType,
    DefaultSerialization, Error, FormData, FormField, HttpClient, LogLevel, Logger, LoggerProxy,
    PathParams, PathTemplate, QueryParams, RequestOption, ResponseSink, Result, Serialization,
    TracingLogger, file_name_from_headers, from_json, headers, to_json,
};

// Re-export http types for methods, status codes and headers
pub use lark_oapi_core::{HeaderMap, Method, StatusCode, header};
