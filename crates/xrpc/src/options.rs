//! Call and handler options

use std::collections::BTreeMap;

/// Option applied to client calls.
///
/// Options given to a generated client constructor apply to every call made
/// with that client; options given to a single call apply only to that call
/// and take precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOption {
    /// Send an extra request header
    Header { name: String, value: String },

    /// Reject responses whose encoded body is larger than this many bytes
    MaxResponseBytes(usize),
}

impl CallOption {
    pub fn header(name: impl AsRef<str>, value: impl Into<String>) -> Self {
        CallOption::Header {
            name: name.as_ref().to_ascii_lowercase(),
            value: value.into(),
        }
    }
}

/// Option applied to generated handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOption {
    /// Reject requests whose encoded body is larger than this many bytes
    MaxRequestBytes(usize),
}

/// Options folded into their effective values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CallConfig {
    pub headers: BTreeMap<String, String>,
    pub max_response_bytes: Option<usize>,
}

impl CallConfig {
    /// Fold options in order; later options override earlier ones.
    pub fn from_options<'a>(options: impl IntoIterator<Item = &'a CallOption>) -> Self {
        let mut config = Self::default();
        for option in options {
            match option {
                CallOption::Header { name, value } => {
                    config
                        .headers
                        .insert(name.to_ascii_lowercase(), value.clone());
                }
                CallOption::MaxResponseBytes(limit) => config.max_response_bytes = Some(*limit),
            }
        }
        config
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct HandlerConfig {
    pub max_request_bytes: Option<usize>,
}

impl HandlerConfig {
    pub fn from_options(options: &[HandlerOption]) -> Self {
        let mut config = Self::default();
        for option in options {
            match option {
                HandlerOption::MaxRequestBytes(limit) => config.max_request_bytes = Some(*limit),
            }
        }
        config
    }
}
