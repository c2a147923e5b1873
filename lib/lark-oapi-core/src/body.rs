//! Body serialization utilities.

use bytes::Bytes;

use crate::Result;

/// Content type for request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json; charset=utf-8`).
    Json,
    /// Multipart form data with its boundary.
    MultipartFormData {
        /// Part separator.
        boundary: String,
    },
}

impl ContentType {
    /// Bare JSON MIME type, used to recognise JSON responses.
    pub const JSON_MIME: &'static str = "application/json";

    /// Header value for this content type.
    #[must_use]
    pub fn header_value(&self) -> String {
        match self {
            Self::Json => "application/json; charset=utf-8".to_string(),
            Self::MultipartFormData { boundary } => {
                format!("multipart/form-data; boundary={boundary}")
            }
        }
    }

    /// Returns `true` if a `Content-Type` header value denotes JSON.
    #[must_use]
    pub fn is_json(header_value: &str) -> bool {
        header_value.contains(Self::JSON_MIME)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.header_value())
    }
}

/// JSON encode/decode capability used for request and response bodies.
///
/// The SDK calls this for every body it writes and for every structured
/// error it reads, so a custom implementation can tweak number handling,
/// field naming, etc.
pub trait Serialization: Send + Sync {
    /// Encode a value.
    fn serialize<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<Bytes>;

    /// Decode a value.
    fn deserialize<T: serde::de::DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}

/// [`Serialization`] backed by `serde_json`, with path-aware decode errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSerialization;

impl Serialization for DefaultSerialization {
    fn serialize<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<Bytes> {
        to_json(value)
    }

    fn deserialize<T: serde::de::DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        from_json(bytes)
    }
}

/// Serialize a value to JSON bytes.
///
/// # Example
///
/// ```
/// use lark_oapi_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Message { receive_id: String }
///
/// let msg = Message { receive_id: "ou_123".to_string() };
/// let bytes = to_json(&msg).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"receive_id":"ou_123"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so the error names the field that failed
/// (e.g. `data.items[2].name`).
///
/// # Example
///
/// ```
/// use lark_oapi_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Chat { chat_id: String }
///
/// let chat: Chat = from_json(br#"{"chat_id":"oc_1"}"#).expect("deserialize");
/// assert_eq!(chat, Chat { chat_id: "oc_1".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}
