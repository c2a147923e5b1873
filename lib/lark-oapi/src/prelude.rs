//! Prelude module for convenient imports.
//!
//! ```ignore
//! use lark_oapi::prelude::*;
//! ```

pub use crate::{
    AccessTokenType, ApiRequest, ApiResponse, Config, Error, FormData, HttpClient, HyperClient,
    Method, RequestOption, Result, Serialization, request,
};

// Re-export serde for response types
pub use serde::{Deserialize, Serialize};
