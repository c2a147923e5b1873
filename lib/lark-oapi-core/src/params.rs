//! Path and query parameter containers.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes kept verbatim in a query component (RFC 3986 unreserved).
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Bytes kept verbatim in a single path segment.
const PATH_SEGMENT: &AsciiSet = &QUERY_COMPONENT
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

/// Escape a query key or value (space becomes `+`).
#[must_use]
pub fn query_escape(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT)
        .to_string()
        .replace("%20", "+")
}

/// Escape a value so it can be placed inside a single path segment.
#[must_use]
pub fn path_escape(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Named path parameters, one value per key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(BTreeMap<String, String>);

impl PathParams {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or `""` when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map_or("", String::as_str)
    }

    /// Sets `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value for `key` if present.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Query parameters, each key holding an ordered list of values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, Vec<String>>);

impl QueryParams {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// First value for `key`, or `""` when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.0
            .get(key)
            .and_then(|values| values.first())
            .map_or("", String::as_str)
    }

    /// All values for `key`.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.0.get(key).map_or(&[], Vec::as_slice)
    }

    /// Replaces the values of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// Appends `value` to the values of `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes as `k=v&k=v2&...`, keys sorted, values in insertion order.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (key, values) in &self.0 {
            let key = query_escape(key);
            for value in values {
                if !out.is_empty() {
                    out.push('&');
                }
                out.push_str(&key);
                out.push('=');
                out.push_str(&query_escape(value));
            }
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.add(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn path_params_get() {
        let params: PathParams = [("test_key", "test_value")].into_iter().collect();
        check!(params.get("test_key") == "test_value");
        check!(params.get("missing") == "");
    }

    #[test]
    fn path_params_set_overwrites() {
        let mut params: PathParams = [("test_key", "test_value")].into_iter().collect();
        params.set("test_key", "other");
        check!(params.get("test_key") == "other");
        check!(params.len() == 1);
    }

    #[test]
    fn query_params_get_first() {
        let mut params = QueryParams::new();
        params.add("test_key", "test_value");
        params.add("test_key", "second");
        check!(params.get("test_key") == "test_value");
        check!(params.get_all("test_key") == ["test_value", "second"]);
        check!(params.get("missing") == "");
    }

    #[test]
    fn query_params_set_replaces_list() {
        let mut params = QueryParams::new();
        params.add("test_key", "a");
        params.add("test_key", "b");
        params.set("test_key", "c");
        check!(params.get_all("test_key") == ["c"]);
    }

    #[test]
    fn query_params_encode_sorted() {
        let mut params = QueryParams::new();
        params.add("user_id_type", "open_id");
        params.add("page_size", "20");
        params.add("department_ids", "od-1");
        params.add("department_ids", "od-2");

        check!(
            params.encode()
                == "department_ids=od-1&department_ids=od-2&page_size=20&user_id_type=open_id"
        );
    }

    #[test]
    fn query_params_encode_escapes() {
        let mut params = QueryParams::new();
        params.set("q", "a b&c=d/é~");
        check!(params.encode() == "q=a+b%26c%3Dd%2F%C3%A9~");
    }

    #[test]
    fn query_params_encode_empty() {
        check!(QueryParams::new().encode() == "");
    }

    #[test]
    fn path_escape_keeps_sub_delims() {
        check!(path_escape("oc_1:x@y") == "oc_1:x@y");
        check!(path_escape("a/b c") == "a%2Fb%20c");
        check!(path_escape("$&+=") == "$&+=");
        check!(path_escape("a;b,c!d'e(f)g*") == "a%3Bb%2Cc%21d%27e%28f%29g%2A");
    }
}
