//! API path templates with `:name` placeholders.

use crate::{Error, PathParams, Result, params::path_escape};

/// An API path before parameter substitution, e.g.
/// `/open-apis/im/v1/chats/:chat_id/members`.
///
/// Every `/`-separated segment starting with `:` names a path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathTemplate(String);

impl PathTemplate {
    /// Create a new path template.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Get the template string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Names of the placeholders, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter_map(|seg| seg.strip_prefix(':'))
    }

    /// Substitute every placeholder with its escaped value.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidRequest`] when a placeholder has no
    /// value or an empty one.
    pub fn render(&self, params: &PathParams) -> Result<String> {
        let segments = self
            .0
            .split('/')
            .map(|seg| {
                let Some(name) = seg.strip_prefix(':') else {
                    return Ok(seg.to_string());
                };
                match params.lookup(name) {
                    None => Err(Error::invalid_request(format!(
                        "http path:{}, name: {name}, not found value",
                        self.0
                    ))),
                    Some("") => Err(Error::invalid_request(format!(
                        "http path:{}, name: {name}, value is empty",
                        self.0
                    ))),
                    Some(value) => Ok(path_escape(value)),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(segments.join("/"))
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PathTemplate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PathTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for PathTemplate {
    fn from(template: String) -> Self {
        Self(template)
    }
}
