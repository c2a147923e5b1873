//! Structured error payload returned by the open platform.
//!
//! Every JSON response carries a business `code` and a `msg`; a non-zero
//! code means the call failed, and the optional `error` block explains why.
//!
//! ```json
//! {
//!   "code": 99992402,
//!   "msg": "field validation failed",
//!   "error": {
//!     "log_id": "2023...",
//!     "field_violations": [{ "field": "page_size", "description": "..." }]
//!   }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Decoded `{code, msg, error}` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeError {
    /// Business code, `0` on success.
    pub code: i64,
    /// Human readable message.
    pub msg: String,
    /// Optional violation details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CodeErrorDetails>,
}

/// Detail block of a [`CodeError`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeErrorDetails {
    /// Server log id for this failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_id: Option<String>,
    /// Free-form key/value details.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<CodeErrorDetail>,
    /// Missing permissions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permission_violations: Vec<CodeErrorPermissionViolation>,
    /// Invalid request fields.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_violations: Vec<CodeErrorFieldViolation>,
}

/// A key/value detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeErrorDetail {
    /// Detail key.
    pub key: String,
    /// Detail value.
    pub value: String,
}

/// A permission the caller lacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeErrorPermissionViolation {
    /// Violation type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Permission scope or subject.
    pub subject: String,
    /// Description.
    pub description: String,
}

/// A request field that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeErrorFieldViolation {
    /// Field name.
    pub field: String,
    /// Offending value.
    pub value: String,
    /// Description.
    pub description: String,
}

impl CodeError {
    /// Returns `true` when the payload reports a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.code != 0
    }
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg:{},code:{}", self.msg, self.code)?;

        let Some(err) = &self.error else {
            return Ok(());
        };

        if !err.details.is_empty() {
            f.write_str(",details:[")?;
            for (i, detail) in err.details.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}={}", detail.key, detail.value)?;
            }
            f.write_str("]")?;
        }

        if !err.permission_violations.is_empty() {
            f.write_str(",permission_violations:[")?;
            for (i, violation) in err.permission_violations.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(
                    f,
                    "{}/{}: {}",
                    violation.kind, violation.subject, violation.description
                )?;
            }
            f.write_str("]")?;
        }

        if !err.field_violations.is_empty() {
            f.write_str(",field_violations:[")?;
            for (i, violation) in err.field_violations.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(
                    f,
                    "{}={}: {}",
                    violation.field, violation.value, violation.description
                )?;
            }
            f.write_str("]")?;
        }

        Ok(())
    }
}
