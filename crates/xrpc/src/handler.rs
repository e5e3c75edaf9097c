//! Server-side handlers wrapping generated dispatch adapters

use crate::context::Context;
use crate::error::{Code, Error, Result};
use crate::message::AnyMessage;
use crate::options::{HandlerConfig, HandlerOption};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::Instrument;

/// Boxed, sendable future
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type UnaryFn =
    dyn Fn(Context, Box<dyn AnyMessage>) -> BoxFuture<'static, Result<Box<dyn AnyMessage>>>
        + Send
        + Sync;

/// Type-erased unary adapter.
///
/// Generated code builds one per method from a closure that downcasts the
/// request to the method's input type and calls the service implementation.
#[derive(Clone)]
pub struct UnaryHandler {
    inner: Arc<UnaryFn>,
}

impl UnaryHandler {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Context, Box<dyn AnyMessage>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Box<dyn AnyMessage>>> + Send + 'static,
    {
        let inner: Arc<UnaryFn> = Arc::new(
            move |ctx: Context,
                  req: Box<dyn AnyMessage>|
                  -> BoxFuture<'static, Result<Box<dyn AnyMessage>>> {
                Box::pin(f(ctx, req))
            },
        );
        Self { inner }
    }

    pub async fn call(&self, ctx: Context, req: Box<dyn AnyMessage>) -> Result<Box<dyn AnyMessage>> {
        (self.inner)(ctx, req).await
    }
}

impl fmt::Debug for UnaryHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnaryHandler").finish_non_exhaustive()
    }
}

/// A unary method ready to be registered on a [`Router`](crate::Router).
#[derive(Debug)]
pub struct Handler {
    procedure: String,
    service: String,
    package: String,
    implementation: UnaryHandler,
    config: HandlerConfig,
}

impl Handler {
    /// Create a handler for one method.
    ///
    /// `procedure`, `service` and `package` are the fully qualified protobuf
    /// names of the method, its service and its package.
    pub fn new(
        procedure: impl Into<String>,
        service: impl Into<String>,
        package: impl Into<String>,
        implementation: UnaryHandler,
        opts: &[HandlerOption],
    ) -> Self {
        Self {
            procedure: procedure.into(),
            service: service.into(),
            package: package.into(),
            implementation,
            config: HandlerConfig::from_options(opts),
        }
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

    /// Run the adapter on an already decoded request
    pub async fn call(&self, ctx: Context, req: Box<dyn AnyMessage>) -> Result<Box<dyn AnyMessage>> {
        let span = tracing::debug_span!("xrpc.handle", procedure = %self.procedure);
        let result = self.implementation.call(ctx, req).instrument(span).await;
        if let Err(err) = &result {
            tracing::debug!(procedure = %self.procedure, code = %err.code(), "handler returned error");
        }
        result
    }

    pub(crate) fn check_request_size(&self, len: usize) -> Result<()> {
        match self.config.max_request_bytes {
            Some(limit) if len > limit => Err(Error::new(
                Code::ResourceExhausted,
                format!("request of {len} bytes exceeds the {limit} byte limit"),
            )),
            _ => Ok(()),
        }
    }
}
