//! Multipart form data for file uploads.
//!
//! # Example
//!
//! ```
//! use lark_oapi_core::FormData;
//!
//! let form = FormData::new()
//!     .add_field("image_type", "message")
//!     .add_file("image", vec![0x89, 0x50, 0x4E, 0x47]);
//!
//! assert_eq!(form.fields().len(), 2);
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use crate::{Error, Result};

/// File name sent for file parts, the server ignores it.
pub const DEFAULT_FILE_NAME: &str = "unknown-file";

/// A single field of a [`FormData`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    /// Plain text value.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// Binary file content.
    File {
        /// Field name.
        name: String,
        /// File name announced in `Content-Disposition`.
        file_name: String,
        /// File content.
        data: Bytes,
    },
}

impl FormField {
    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// A multipart form: text fields and files, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<FormField>,
}

impl FormData {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field. Any displayable value is accepted.
    #[must_use]
    pub fn add_field(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push(FormField::Text {
            name: name.into(),
            value: value.to_string(),
        });
        self
    }

    /// Add a file field named [`DEFAULT_FILE_NAME`].
    #[must_use]
    pub fn add_file(self, name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.add_named_file(name, DEFAULT_FILE_NAME, data)
    }

    /// Add a file field with an explicit file name.
    #[must_use]
    pub fn add_named_file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.fields.push(FormField::File {
            name: name.into(),
            file_name: file_name.into(),
            data: data.into(),
        });
        self
    }

    /// Turn a JSON object into text fields, one per member.
    ///
    /// Strings are sent as-is, `null` members are skipped and any other
    /// value is sent as its JSON text.
    ///
    /// # Errors
    ///
    /// Fails when `value` is not a JSON object.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(members) = value else {
            return Err(Error::invalid_request(format!(
                "file upload body must be a JSON object, got {value}"
            )));
        };

        let form = members
            .iter()
            .fold(Self::new(), |form, (name, member)| match member {
                serde_json::Value::Null => form,
                serde_json::Value::String(text) => form.add_field(name, text),
                other => form.add_field(name, other),
            });
        Ok(form)
    }

    /// Fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Encode with a fresh random boundary.
    ///
    /// Returns `(boundary, body)`.
    #[must_use]
    pub fn encode(&self) -> (String, Bytes) {
        let boundary = generate_boundary();
        let body = self.encode_with_boundary(&boundary);
        (boundary, body)
    }

    /// Encode the form using `boundary` as part separator.
    #[must_use]
    pub fn encode_with_boundary(&self, boundary: &str) -> Bytes {
        let mut buf = BytesMut::new();

        for field in &self.fields {
            buf.put_slice(b"--");
            buf.put_slice(boundary.as_bytes());
            buf.put_slice(b"\r\n");

            buf.put_slice(b"Content-Disposition: form-data; name=\"");
            buf.put_slice(escape_quotes(field.name()).as_bytes());
            buf.put_slice(b"\"");

            match field {
                FormField::Text { value, .. } => {
                    buf.put_slice(b"\r\n\r\n");
                    buf.put_slice(value.as_bytes());
                }
                FormField::File {
                    file_name, data, ..
                } => {
                    buf.put_slice(b"; filename=\"");
                    buf.put_slice(escape_quotes(file_name).as_bytes());
                    buf.put_slice(b"\"\r\n");
                    buf.put_slice(b"Content-Type: application/octet-stream\r\n\r\n");
                    buf.put_slice(data);
                }
            }
            buf.put_slice(b"\r\n");
        }

        buf.put_slice(b"--");
        buf.put_slice(boundary.as_bytes());
        buf.put_slice(b"--\r\n");

        buf.freeze()
    }
}

fn escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Generate a random boundary string.
fn generate_boundary() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    format!("----LarkFormBoundary{timestamp:x}")
}
