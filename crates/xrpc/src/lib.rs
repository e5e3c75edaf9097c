//! xrpc - runtime support for generated unary RPC bindings
//!
//! Code emitted by `protoc-gen-xrpc` compiles against this crate. It provides:
//! - [`Client`] for the per-method sub-clients held by generated clients
//! - [`Handler`], [`UnaryHandler`] and [`Router`] for generated server constructors
//! - [`Error`] and [`Code`] for error reporting on both sides
//! - [`transport`] with the [`Doer`](transport::Doer) trait that actually moves bytes
//!
//! Generated files reference [`SUPPORTS_CODEGEN_V0`]. If that constant is
//! missing, the generated code and this crate are incompatible and the build
//! fails instead of misbehaving at runtime.

mod client;
mod context;
mod error;
mod handler;
mod message;
mod options;
mod router;
pub mod transport;

pub use async_trait::async_trait;
pub use client::Client;
pub use context::Context;
pub use error::{Code, Error, Result};
pub use handler::{BoxFuture, Handler, UnaryHandler};
pub use message::AnyMessage;
pub use options::{CallOption, HandlerOption};
pub use router::Router;
pub use transport::Doer;

/// Version of the runtime library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Capability token for version 0 of the generated code contract.
///
/// Every generated file contains `const _: bool = ::xrpc::SUPPORTS_CODEGEN_V0;`.
/// A future incompatible contract adds a new token and eventually removes this one.
pub const SUPPORTS_CODEGEN_V0: bool = true;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnyMessage, CallOption, Client, Code, Context, Doer, Error, Handler, HandlerOption,
        Result, Router, UnaryHandler,
    };
}
