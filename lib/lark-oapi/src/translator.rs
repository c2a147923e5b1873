//! Translation of [`ApiRequest`] descriptors into outbound HTTP requests.

use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue, USER_AGENT};
use http::{HeaderMap, Method};
use lark_oapi_core::{
    AccessTokenType, ApiRequest, Body, ContentType, Error, FormData, PathParams, PathTemplate,
    QueryParams, RequestOption, Result, Serialization, headers,
};
use url::Url;

use crate::Config;

/// Builds the HTTP request for one attempt of a call.
///
/// Holds no state; the same value can translate any number of requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqTranslator;

impl ReqTranslator {
    /// Translate `req` for the given authentication mode.
    ///
    /// A JSON object body sent with [`RequestOption::file_upload`] goes out
    /// as multipart text fields.
    ///
    /// # Errors
    ///
    /// Fails on a missing path parameter, a body that cannot be serialized,
    /// an unparsable URL or an invalid caller header.
    pub fn translate<C, S: Serialization>(
        &self,
        req: &ApiRequest,
        token_type: AccessTokenType,
        config: &Config<C, S>,
        option: &RequestOption,
    ) -> Result<http::Request<Bytes>> {
        let url = self.full_url(
            config.base_url(),
            req.path(),
            req.path_params(),
            req.query_params(),
        )?;
        let upload_form = match req.body() {
            Some(Body::Json(value)) if option.is_file_upload() => {
                Some(Body::FormData(FormData::from_json(value)?))
            }
            _ => None,
        };
        let body = upload_form.as_ref().or(req.body());
        let (content_type, body) = self.payload(body, config.serializer())?;

        self.new_http_request(
            req.method(),
            &url,
            content_type.as_ref(),
            body,
            token_type,
            option,
        )
    }

    /// Render the path, prefix the domain unless the path is already
    /// absolute, and append the encoded query.
    ///
    /// # Errors
    ///
    /// Fails when a `:name` segment has no value or an empty one.
    pub fn full_url(
        &self,
        domain: &str,
        path: &PathTemplate,
        path_params: &PathParams,
        query_params: &QueryParams,
    ) -> Result<String> {
        let path = path.render(path_params)?;

        let mut url = if path.starts_with("http") {
            path
        } else {
            format!("{domain}{path}")
        };

        if !query_params.is_empty() {
            url.push('?');
            url.push_str(&query_params.encode());
        }

        Ok(url)
    }

    /// Encode the body. No body means no content type and an empty payload.
    ///
    /// # Errors
    ///
    /// Fails when the serializer rejects a JSON body.
    pub fn payload<S: Serialization>(
        &self,
        body: Option<&Body>,
        serializer: &S,
    ) -> Result<(Option<ContentType>, Bytes)> {
        match body {
            None => Ok((None, Bytes::new())),
            Some(Body::Json(value)) => {
                let bytes = serializer.serialize(value)?;
                Ok((Some(ContentType::Json), bytes))
            }
            Some(Body::FormData(form)) => {
                let (boundary, bytes) = form.encode();
                Ok((Some(ContentType::MultipartFormData { boundary }), bytes))
            }
        }
    }

    /// Assemble the outbound request and its headers.
    ///
    /// Caller headers come first; `User-Agent`, `Content-Type`,
    /// `X-Request-Id` and `Authorization` are then set over them.
    ///
    /// # Errors
    ///
    /// Fails on an unparsable URL or an invalid header name or value.
    pub fn new_http_request(
        &self,
        method: &Method,
        url: &str,
        content_type: Option<&ContentType>,
        body: Bytes,
        token_type: AccessTokenType,
        option: &RequestOption,
    ) -> Result<http::Request<Bytes>> {
        // Validate only; the parsed form resolves dot segments, so the
        // request keeps the assembled string as-is.
        Url::parse(url)?;
        let uri: http::Uri = url
            .parse()
            .map_err(|e| Error::invalid_request(format!("url {url}: {e}")))?;

        let mut header_map = HeaderMap::new();
        for (name, value) in option.headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::invalid_request(format!("header name '{name}': {e}")))?;
            header_map.append(header_name, header_value(name, value)?);
        }

        header_map.insert(USER_AGENT, HeaderValue::from_static(headers::USER_AGENT));

        if let Some(content_type) = content_type {
            header_map.insert(
                CONTENT_TYPE,
                header_value(CONTENT_TYPE.as_str(), &content_type.header_value())?,
            );
        }

        if let Some(request_id) = option.get_request_id() {
            header_map.insert(
                HeaderName::from_static("x-request-id"),
                header_value(headers::X_REQUEST_ID, request_id)?,
            );
        }

        if token_type != AccessTokenType::None {
            let token = option.access_token(token_type);
            header_map.insert(
                AUTHORIZATION,
                header_value(AUTHORIZATION.as_str(), &format!("Bearer {token}"))?,
            );
        }

        let mut request = http::Request::new(body);
        *request.method_mut() = method.clone();
        *request.uri_mut() = uri;
        *request.headers_mut() = header_map;

        Ok(request)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::invalid_request(format!("header value of '{name}': {e}")))
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;
    use crate::test_support::{MockClient, config};

    fn header<'a>(request: &'a http::Request<Bytes>, name: &str) -> Option<&'a str> {
        request.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn full_url_concatenates_domain() {
        let url = ReqTranslator
            .full_url(
                "test",
                &PathTemplate::new("test1"),
                &PathParams::new(),
                &QueryParams::new(),
            )
            .expect("url");
        check!(url == "testtest1");
    }

    #[test]
    fn full_url_substitutes_and_escapes() {
        let path_params: PathParams = [("chat_id", "oc 1/2"), ("member", "ou_3")]
            .into_iter()
            .collect();
        let query_params: QueryParams = [("user_id_type", "open_id"), ("page_token", "a b")]
            .into_iter()
            .collect();

        let url = ReqTranslator
            .full_url(
                "https://open.feishu.cn",
                &PathTemplate::new("/open-apis/im/v1/chats/:chat_id/members/:member"),
                &path_params,
                &query_params,
            )
            .expect("url");

        check!(
            url == "https://open.feishu.cn/open-apis/im/v1/chats/oc%201%2F2/members/ou_3?page_token=a+b&user_id_type=open_id"
        );
    }

    #[test]
    fn full_url_keeps_absolute_paths() {
        let url = ReqTranslator
            .full_url(
                "https://open.feishu.cn",
                &PathTemplate::new("https://other.example.com/x"),
                &PathParams::new(),
                &QueryParams::new(),
            )
            .expect("url");
        check!(url == "https://other.example.com/x");
    }

    #[test]
    fn full_url_missing_path_param() {
        let result = ReqTranslator.full_url(
            "https://open.feishu.cn",
            &PathTemplate::new("/chats/:chat_id"),
            &PathParams::new(),
            &QueryParams::new(),
        );
        let_assert!(Err(Error::InvalidRequest(msg)) = result);
        check!(msg == "http path:/chats/:chat_id, name: chat_id, not found value");
    }

    #[test]
    fn payload_variants() {
        let serializer = lark_oapi_core::DefaultSerialization;

        let (content_type, body) = ReqTranslator.payload(None, &serializer).expect("empty");
        check!(content_type.is_none());
        check!(body.is_empty());

        let json = Body::Json(serde_json::json!({"text": "hi"}));
        let (content_type, body) = ReqTranslator
            .payload(Some(&json), &serializer)
            .expect("json");
        check!(content_type == Some(ContentType::Json));
        check!(body.as_ref() == br#"{"text":"hi"}"#);

        let form = Body::FormData(FormData::new().add_field("k", "v"));
        let (content_type, body) = ReqTranslator
            .payload(Some(&form), &serializer)
            .expect("form");
        let_assert!(Some(ContentType::MultipartFormData { boundary }) = content_type);
        check!(String::from_utf8_lossy(&body).starts_with(&format!("--{boundary}\r\n")));
    }

    #[test]
    fn new_http_request_sets_headers() {
        let option = RequestOption::new()
            .header("X-Custom", "a")
            .header("X-Custom", "b")
            .request_id("req-1")
            .tenant_access_token("t-123");

        let request = ReqTranslator
            .new_http_request(
                &Method::POST,
                "https://open.feishu.cn/open-apis/im/v1/messages",
                Some(&ContentType::Json),
                Bytes::from_static(b"{}"),
                AccessTokenType::Tenant,
                &option,
            )
            .expect("request");

        check!(*request.method() == Method::POST);
        check!(request.uri() == "https://open.feishu.cn/open-apis/im/v1/messages");
        check!(request.headers().get_all("x-custom").iter().count() == 2);
        check!(header(&request, "user-agent") == Some(headers::USER_AGENT));
        check!(header(&request, "content-type") == Some("application/json; charset=utf-8"));
        check!(header(&request, "x-request-id") == Some("req-1"));
        check!(header(&request, "authorization") == Some("Bearer t-123"));
        check!(request.body().as_ref() == b"{}");
    }

    #[test]
    fn new_http_request_without_token() {
        let request = ReqTranslator
            .new_http_request(
                &Method::GET,
                "https://open.feishu.cn/x",
                None,
                Bytes::new(),
                AccessTokenType::None,
                &RequestOption::new(),
            )
            .expect("request");

        check!(header(&request, "authorization").is_none());
        check!(header(&request, "content-type").is_none());
    }

    #[test]
    fn new_http_request_missing_token_is_empty_bearer() {
        let request = ReqTranslator
            .new_http_request(
                &Method::GET,
                "https://open.feishu.cn/x",
                None,
                Bytes::new(),
                AccessTokenType::Personal,
                &RequestOption::new(),
            )
            .expect("request");

        check!(header(&request, "authorization") == Some("Bearer "));
    }

    #[test]
    fn new_http_request_rejects_bad_input() {
        let result = ReqTranslator.new_http_request(
            &Method::GET,
            "not a url",
            None,
            Bytes::new(),
            AccessTokenType::None,
            &RequestOption::new(),
        );
        let_assert!(Err(Error::InvalidUrl(_)) = result);

        let result = ReqTranslator.new_http_request(
            &Method::GET,
            "https://open.feishu.cn/x",
            None,
            Bytes::new(),
            AccessTokenType::None,
            &RequestOption::new().header("bad header", "v"),
        );
        let_assert!(Err(Error::InvalidRequest(_)) = result);
    }

    #[test]
    fn translate_keeps_dot_segments_in_path_params() {
        let config = config(MockClient::ok("{}"));
        let req = ApiRequest::builder(Method::GET, "/open-apis/im/v1/chats/:chat_id/members")
            .path_param("chat_id", "..")
            .build();

        let request = ReqTranslator
            .translate(&req, AccessTokenType::None, &config, &RequestOption::new())
            .expect("request");

        check!(request.uri().path() == "/open-apis/im/v1/chats/../members");

        let req = ApiRequest::builder(Method::GET, "/open-apis/im/v1/chats/:chat_id")
            .path_param("chat_id", ".")
            .build();
        let request = ReqTranslator
            .translate(&req, AccessTokenType::None, &config, &RequestOption::new())
            .expect("request");

        check!(request.uri().path() == "/open-apis/im/v1/chats/.");
    }

    #[test]
    fn translate_file_upload_sends_json_as_form_fields() {
        let config = config(MockClient::ok("{}"));
        let req = ApiRequest::builder(Method::POST, "/open-apis/drive/v1/files/upload_prepare")
            .json(&serde_json::json!({"file_name": "report.pdf", "size": 1024}))
            .expect("json")
            .build();

        let request = ReqTranslator
            .translate(
                &req,
                AccessTokenType::Tenant,
                &config,
                &RequestOption::new().tenant_access_token("t").file_upload(),
            )
            .expect("request");

        let_assert!(Some(content_type) = header(&request, "content-type"));
        let_assert!(Some(boundary) = content_type.strip_prefix("multipart/form-data; boundary="));
        let expected = FormData::new()
            .add_field("file_name", "report.pdf")
            .add_field("size", 1024)
            .encode_with_boundary(boundary);
        check!(*request.body() == expected);

        let request = ReqTranslator
            .translate(
                &req,
                AccessTokenType::Tenant,
                &config,
                &RequestOption::new().tenant_access_token("t"),
            )
            .expect("request");
        check!(header(&request, "content-type") == Some("application/json; charset=utf-8"));
    }

    #[test]
    fn translate_composes_everything() {
        let config = config(MockClient::ok("{}"));
        let req = ApiRequest::builder(Method::PATCH, "/open-apis/im/v1/chats/:chat_id")
            .path_param("chat_id", "oc_1")
            .query_param("user_id_type", "open_id")
            .json(&serde_json::json!({"name": "team"}))
            .expect("json")
            .build();

        let request = ReqTranslator
            .translate(
                &req,
                AccessTokenType::User,
                &config,
                &RequestOption::new().user_access_token("u-1"),
            )
            .expect("request");

        check!(*request.method() == Method::PATCH);
        check!(
            request.uri().to_string()
                == format!(
                    "{}/open-apis/im/v1/chats/oc_1?user_id_type=open_id",
                    config.base_url()
                )
        );
        check!(header(&request, "authorization") == Some("Bearer u-1"));
        check!(request.body().as_ref() == br#"{"name":"team"}"#);
    }
}
