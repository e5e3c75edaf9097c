//! Wire-level request and response types and the [`Doer`] transport trait
//!
//! A call travels as a [`Request`] (URL, headers, protobuf body). The outcome
//! travels back as a [`Response`] whose `xrpc-status` header carries the
//! numeric [`Code`] and whose `xrpc-message` header carries the error message
//! for failures.

use crate::error::{Code, Error, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Headers starting with this prefix belong to the protocol
pub const RESERVED_HEADER_PREFIX: &str = "xrpc-";

/// Header carrying the numeric status code
pub const STATUS_HEADER: &str = "xrpc-status";

/// Header carrying the error message of a failed call
pub const MESSAGE_HEADER: &str = "xrpc-message";

/// Content type of request and response bodies
pub const CONTENT_TYPE: &str = "application/proto";

/// Outgoing call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Complete URL of the method (`<base>/<package>.<Service>/<Method>`)
    pub url: String,

    /// Lower-cased header names
    pub headers: BTreeMap<String, String>,

    /// Encoded request message
    pub body: Vec<u8>,
}

impl Request {
    pub fn new(url: impl Into<String>, body: Vec<u8>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), CONTENT_TYPE.to_string());
        Self {
            url: url.into(),
            headers,
            body,
        }
    }

    /// Path component of the URL, without scheme, authority or query.
    ///
    /// ```
    /// use xrpc::transport::Request;
    ///
    /// let request = Request::new("https://api.acme.com/acme.Greeter/Greet?x=1", Vec::new());
    /// assert_eq!(request.path(), "/acme.Greeter/Greet");
    /// ```
    pub fn path(&self) -> &str {
        let without_query = self.url.split(['?', '#']).next().unwrap_or_default();
        match without_query.find("://") {
            Some(idx) => {
                let rest = &without_query[idx + 3..];
                rest.find('/').map_or("/", |start| &rest[start..])
            }
            None => without_query,
        }
    }
}

/// Result of a call as seen on the wire
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    /// Successful response carrying an encoded message
    pub fn ok(body: Vec<u8>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(STATUS_HEADER.to_string(), Code::Ok.as_u32().to_string());
        headers.insert("content-type".to_string(), CONTENT_TYPE.to_string());
        Self { headers, body }
    }

    /// Failed response carrying an error
    pub fn from_error(err: &Error) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(STATUS_HEADER.to_string(), err.code().as_u32().to_string());
        headers.insert(MESSAGE_HEADER.to_string(), err.message().to_string());
        Self {
            headers,
            body: Vec::new(),
        }
    }

    /// Status code of the response. A missing or malformed status is [`Code::Unknown`].
    pub fn code(&self) -> Code {
        self.headers
            .get(STATUS_HEADER)
            .and_then(|value| value.parse::<u32>().ok())
            .map_or(Code::Unknown, Code::from_u32)
    }

    /// Convert to the body on success or the carried error on failure
    pub fn into_result(self) -> Result<Vec<u8>> {
        match self.code() {
            Code::Ok => Ok(self.body),
            code => {
                let status = self.headers.get(STATUS_HEADER);
                let message = match (self.headers.get(MESSAGE_HEADER), status) {
                    (Some(message), _) => message.clone(),
                    (None, None) => format!("response without {STATUS_HEADER} header"),
                    (None, Some(status)) if status.parse::<u32>().is_err() => {
                        format!("response with malformed {STATUS_HEADER} header `{status}`")
                    }
                    (None, Some(_)) => code.as_str().to_string(),
                };
                Err(Error::new(code, message))
            }
        }
    }
}

/// Executes requests on behalf of generated clients.
///
/// Implementations typically wrap an HTTP client. [`Router`](crate::Router)
/// implements it directly for in-process calls.
#[async_trait]
pub trait Doer: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response>;
}
