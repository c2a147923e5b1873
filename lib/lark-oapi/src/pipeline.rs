//! Call orchestration: validation, translation, sending and the single
//! retry on dial failure.
//!
//! # Example
//!
//! ```ignore
//! use lark_oapi::{AccessTokenType, ApiRequest, Config, Method, RequestOption};
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
//! ```

use http::StatusCode;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use lark_oapi_core::{
    AccessTokenType, ApiRequest, ApiResponse, CodeError, ContentType, Error, HttpClient, LogLevel,
    RequestOption, Result, Serialization,
};

use crate::{Config, ReqTranslator, transport};

/// Attempts per call. Only a dial failure earns a second one.
pub const MAX_ATTEMPTS: usize = 2;

/// Execute one API call.
///
/// Resolves the authentication mode from `option`, validates the call and
/// runs [`do_request`].
///
/// # Errors
///
/// - [`Error::IllegalParam`] for a reserved header or an unsupported
///   authentication mode
/// - any error of [`do_request`]
pub async fn request<C, S>(
    req: &ApiRequest,
    config: &Config<C, S>,
    option: &RequestOption,
) -> Result<ApiResponse>
where
    C: HttpClient,
    S: Serialization,
{
    let token_type = option.resolve_token_type();
    validate(req, option, token_type)?;
    do_request(&ReqTranslator, req, token_type, config, option).await
}

/// Check the caller input before anything is sent.
///
/// # Errors
///
/// Returns [`Error::IllegalParam`] when a caller header uses a reserved name
/// or when `req` does not accept `token_type`.
pub fn validate(
    req: &ApiRequest,
    option: &RequestOption,
    token_type: AccessTokenType,
) -> Result<()> {
    if let Some(name) = option.reserved_header() {
        return Err(Error::illegal_param(format!(
            "use {name} as header key is not allowed"
        )));
    }

    if !req.supports(token_type) {
        let supported = req
            .supported_token_types()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(Error::illegal_param(format!(
            "{token_type} is not supported by {} {}, supported: [{supported}]",
            req.method(),
            req.path()
        )));
    }

    Ok(())
}

/// Send the call, retrying once if the connection could not be
/// established, then check the answer for a business error.
///
/// Every attempt translates `req` again.
///
/// # Errors
///
/// - translation errors
/// - [`Error::DialFailed`] after [`MAX_ATTEMPTS`] failed dials
/// - any other transport error, returned at once
/// - a decode error when a JSON body is not a valid error payload
/// - [`Error::Api`] when the payload carries a non-zero code
pub async fn do_request<C, S>(
    translator: &ReqTranslator,
    req: &ApiRequest,
    token_type: AccessTokenType,
    config: &Config<C, S>,
    option: &RequestOption,
) -> Result<ApiResponse>
where
    C: HttpClient,
    S: Serialization,
{
    let logger = config.logger();
    let mut attempt = 1;

    let response = loop {
        let http_request = translator.translate(req, token_type, config, option)?;

        if logger.enabled(LogLevel::Debug) {
            if config.log_req_at_debug() {
                logger.debug(&format!("req:{}", describe_request(&http_request)));
            } else {
                logger.debug(&format!("req:{},{}", req.method(), req.path()));
            }
        }

        let result = transport::send(http_request, config.http_client(), logger).await;
        if config.log_req_at_debug() {
            match &result {
                Ok(response) => logger.debug(&format!("resp:{response}")),
                Err(err) => logger.debug(&format!("resp:<none>, {err}")),
            }
        }

        match result {
            Ok(response) => break response,
            Err(err) if err.is_dial_failed() && attempt < MAX_ATTEMPTS => {
                logger.debug(&format!("attempt {attempt} failed, retrying: {err}"));
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    };

    check_response(response, option, config.serializer())
}

fn check_response<S: Serialization>(
    response: ApiResponse,
    option: &RequestOption,
    serializer: &S,
) -> Result<ApiResponse> {
    let downloaded = option.is_file_download() && response.status_code() == StatusCode::OK;
    if downloaded || !response.is_json() {
        return Ok(response);
    }

    // A `null` document carries no error.
    let Some(code_error) = response.decode_json::<Option<CodeError>, _>(serializer)? else {
        return Ok(response);
    };
    if !code_error.is_error() {
        return Ok(response);
    }

    let mut request_id = response.request_id().to_string();
    if request_id.is_empty() {
        request_id = code_error
            .error
            .as_ref()
            .and_then(|details| details.log_id.clone())
            .unwrap_or_default();
    }

    Err(Error::Api {
        status: response.status(),
        request_id,
        error: code_error,
    })
}

fn describe_request(request: &http::Request<bytes::Bytes>) -> String {
    let headers = request
        .headers()
        .iter()
        .map(|(name, value)| {
            if name == AUTHORIZATION {
                format!("{name}: ***")
            } else {
                format!("{name}: {}", String::from_utf8_lossy(value.as_bytes()))
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let is_json = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(ContentType::is_json);
    let body = if is_json {
        String::from_utf8_lossy(request.body()).into_owned()
    } else {
        format!("<binary> len {}", request.body().len())
    };

    format!(
        "{} {}, Header:{{{headers}}}, Body: {body}",
        request.method(),
        request.uri()
    )
}
