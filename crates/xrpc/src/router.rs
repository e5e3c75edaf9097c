//! Path-based routing of unary requests to handlers

use crate::context::Context;
use crate::error::{Code, Error, Result};
use crate::handler::Handler;
use crate::message::AnyMessage;
use crate::transport::{Doer, Request, Response};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type Decoder = fn(&[u8]) -> Result<Box<dyn AnyMessage>>;

#[derive(Clone)]
struct Route {
    handler: Arc<Handler>,
    decode: Decoder,
}

/// Routing table from mount paths (`/<package>.<Service>/<Method>`) to handlers.
///
/// Generated handler constructors return a router together with the service
/// mount path; [`Router::mount`] combines several of them.
#[derive(Clone, Default)]
pub struct Router {
    routes: BTreeMap<String, Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` at `path`, decoding wire requests as `Req`.
    ///
    /// Registering the same path twice replaces the earlier handler.
    pub fn handle<Req>(&mut self, path: impl Into<String>, handler: Handler)
    where
        Req: prost::Message + Default + fmt::Debug + 'static,
    {
        let path = path.into();
        tracing::trace!(%path, procedure = handler.procedure(), "registering route");
        let route = Route {
            handler: Arc::new(handler),
            decode: decode_message::<Req>,
        };
        if self.routes.insert(path.clone(), route).is_some() {
            tracing::warn!(%path, "replaced existing route");
        }
    }

    /// Add every route of `router`, which was built for `mount_path`.
    pub fn mount(&mut self, mount_path: &str, router: Router) {
        for (path, route) in router.routes {
            if !path.starts_with(mount_path) {
                tracing::warn!(%path, mount_path, "route is outside its mount path");
            }
            if self.routes.insert(path.clone(), route).is_some() {
                tracing::warn!(%path, "replaced existing route");
            }
        }
    }

    /// Registered paths in sorted order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn handler(&self, path: &str) -> Option<&Handler> {
        self.routes.get(path).map(|route| route.handler.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Dispatch an already decoded message to the handler at `path`.
    pub async fn invoke(
        &self,
        path: &str,
        ctx: Context,
        req: Box<dyn AnyMessage>,
    ) -> Result<Box<dyn AnyMessage>> {
        let route = self.route(path)?;
        route.handler.call(ctx, req).await
    }

    /// Dispatch a wire request and encode the outcome as a wire response.
    pub async fn serve(&self, request: Request) -> Response {
        match self.dispatch(request).await {
            Ok(body) => Response::ok(body),
            Err(err) => Response::from_error(&err),
        }
    }

    async fn dispatch(&self, request: Request) -> Result<Vec<u8>> {
        let path = request.path().to_string();
        let route = self.route(&path)?;
        route.handler.check_request_size(request.body.len())?;

        let message = (route.decode)(&request.body)?;
        let ctx = Context::from_headers(request.headers);
        let reply = route.handler.call(ctx, message).await?;
        Ok(reply.encode_message())
    }

    fn route(&self, path: &str) -> Result<&Route> {
        self.routes.get(path).ok_or_else(|| {
            tracing::debug!(%path, "no route");
            Error::new(Code::NotFound, format!("no handler registered for {path}"))
        })
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("paths", &self.routes.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Serves requests in-process, which makes a router usable as a client transport.
#[async_trait]
impl Doer for Router {
    async fn execute(&self, request: Request) -> Result<Response> {
        Ok(self.serve(request).await)
    }
}

fn decode_message<T>(bytes: &[u8]) -> Result<Box<dyn AnyMessage>>
where
    T: prost::Message + Default + fmt::Debug + 'static,
{
    T::decode(bytes)
        .map(|message| Box::new(message) as Box<dyn AnyMessage>)
        .map_err(|err| Error::new(Code::InvalidArgument, format!("failed to decode request: {err}")))
}
