//! Per-method client used by generated client implementations

use crate::context::Context;
use crate::error::{Code, Error, Result};
use crate::options::{CallConfig, CallOption};
use crate::transport::{Doer, Request};
use std::fmt;
use std::sync::Arc;

/// Client for a single RPC method.
///
/// Generated clients hold one of these per unary method and delegate every
/// call to [`Client::call`].
#[derive(Clone)]
pub struct Client {
    doer: Arc<dyn Doer>,
    url: String,
    procedure: String,
    service: String,
    package: String,
    options: Vec<CallOption>,
}

impl Client {
    /// Create a client for one method.
    ///
    /// `url` is the complete URL of the method; `procedure`, `service` and
    /// `package` are the fully qualified protobuf names of the method, its
    /// service and its package.
    pub fn new(
        doer: Arc<dyn Doer>,
        url: impl Into<String>,
        procedure: impl Into<String>,
        service: impl Into<String>,
        package: impl Into<String>,
        opts: &[CallOption],
    ) -> Self {
        Self {
            doer,
            url: url.into(),
            procedure: procedure.into(),
            service: service.into(),
            package: package.into(),
            options: opts.to_vec(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn procedure(&self) -> &str {
        &self.procedure
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Send `req` and decode the reply into `res`.
    ///
    /// Options passed here are applied after the client-wide options.
    pub async fn call<Req, Res>(
        &self,
        ctx: Context,
        req: &Req,
        res: &mut Res,
        opts: &[CallOption],
    ) -> Result<()>
    where
        Req: prost::Message,
        Res: prost::Message,
    {
        let config = CallConfig::from_options(self.options.iter().chain(opts));

        let mut request = Request::new(self.url.clone(), req.encode_to_vec());
        for (name, value) in ctx.headers().iter().chain(config.headers.iter()) {
            request.headers.insert(name.clone(), value.clone());
        }

        tracing::debug!(procedure = %self.procedure, url = %self.url, "sending request");

        let response = self.doer.execute(request).await?;
        let body = response.into_result()?;

        if let Some(limit) = config.max_response_bytes {
            if body.len() > limit {
                return Err(Error::new(
                    Code::ResourceExhausted,
                    format!(
                        "response of {} bytes exceeds the {limit} byte limit",
                        body.len()
                    ),
                ));
            }
        }

        res.clear();
        res.merge(body.as_slice()).map_err(|err| {
            Error::new(
                Code::Internal,
                format!("failed to decode {} response: {err}", self.procedure),
            )
        })?;

        tracing::trace!(procedure = %self.procedure, bytes = body.len(), "received response");
        Ok(())
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.url)
            .field("procedure", &self.procedure)
            .field("service", &self.service)
            .field("package", &self.package)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "client/client_tests.rs"]
mod client_tests;
