//! Single HTTP exchange.

use bytes::Bytes;
use http::StatusCode;
use lark_oapi_core::{
    ApiResponse, Error, HttpClient, LoggerProxy, Result, request_id_from_headers,
};

/// Execute `request` once and wrap the answer.
///
/// Client errors propagate unchanged. A `504 Gateway Timeout` answer is
/// logged with its correlation id and becomes [`Error::ServerTimeout`].
///
/// # Errors
///
/// Returns the client error, or [`Error::ServerTimeout`] on a 504.
pub async fn send<C: HttpClient>(
    request: http::Request<Bytes>,
    client: &C,
    logger: &LoggerProxy,
) -> Result<ApiResponse> {
    let path = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path().to_string(), ToString::to_string);

    let response = client.execute(request).await?;

    if response.status() == StatusCode::GATEWAY_TIMEOUT {
        let request_id = request_id_from_headers(response.headers());
        logger.info(&format!(
            "req path:{path}, server time out,requestId:{request_id}"
        ));
        return Err(Error::ServerTimeout);
    }

    Ok(ApiResponse::from(response))
}
