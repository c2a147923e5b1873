//! Core types and traits for the Lark open platform SDK.
//!
//! This crate provides the foundational types shared by every API call:
//! - [`ApiRequest`] and [`ApiRequestBuilder`] - call descriptors
//! - [`PathParams`], [`QueryParams`] and [`PathTemplate`] - parameters and URL rendering
//! - [`FormData`] - multipart bodies for uploads
//! - [`RequestOption`] and [`AccessTokenType`] - per-call headers and authentication
//! - [`ApiResponse`] - buffered responses with JSON decoding
//! - [`CodeError`] - business error payloads
//! - [`Error`] and [`Result`] - error handling
//! - [`HttpClient`] - the HTTP execution seam
//! - [`Serialization`] - pluggable JSON codec
//! - [`Logger`] - pluggable logging sink

mod body;
mod client;
mod code_error;
mod error;
pub mod headers;
mod logger;
mod multipart;
mod option;
mod params;
mod path_template;
pub mod prelude;
mod request;
mod response;

pub use body::{ContentType, DefaultSerialization, Serialization, from_json, to_json};
pub use client::HttpClient;
pub use code_error::{
    CodeError, CodeErrorDetail, CodeErrorDetails, CodeErrorFieldViolation,
    CodeErrorPermissionViolation,
};
pub use error::{Error, Result};
pub use logger::{LogLevel, Logger, LoggerProxy, TracingLogger};
pub use multipart::{DEFAULT_FILE_NAME, FormData, FormField};
pub use option::{AccessTokenType, RequestOption};
pub use params::{PathParams, QueryParams, path_escape, query_escape};
pub use path_template::PathTemplate;
pub use request::{ApiRequest, ApiRequestBuilder, Body};
pub use response::{
    ApiResponse, ResponseSink, file_name_from_headers, request_id_from_headers,
};

// Re-export http crate types for methods, status codes and headers
pub use http::{HeaderMap, Method, StatusCode, header};
