//! Per-call context carried from callers to handlers

use crate::transport::RESERVED_HEADER_PREFIX;
use std::collections::BTreeMap;

/// Request metadata for a single call.
///
/// On the client side the headers are sent with the request. On the server
/// side the context is rebuilt from the incoming request headers, without the
/// protocol's own reserved headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    headers: BTreeMap<String, String>,
}

impl Context {
    /// An empty context
    pub fn background() -> Self {
        Self::default()
    }

    /// Add a header. Names are case-insensitive and stored lower-cased.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Look up a header by (case-insensitive) name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub(crate) fn from_headers(headers: BTreeMap<String, String>) -> Self {
        let headers = headers
            .into_iter()
            .filter(|(name, _)| !name.starts_with(RESERVED_HEADER_PREFIX) && name != "content-type")
            .collect();
        Self { headers }
    }
}
