//! Prelude module for convenient imports.
//!
//! ```ignore
//! use lark_oapi_core::prelude::*;
//! ```

pub use crate::{
    AccessTokenType, ApiRequest, ApiRequestBuilder, ApiResponse, Body, CodeError,
    DefaultSerialization, Error, FormData, HttpClient, Logger, Method, RequestOption, Result,
    Serialization, from_json, to_json,
};
