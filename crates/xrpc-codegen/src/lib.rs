//! xrpc-codegen - stub generator for unary xrpc services
//!
//! Turns protobuf service descriptors into Rust client and server bindings
//! that compile against the `xrpc` runtime crate. Streaming methods are
//! recognized and left out.
//!
//! # Usage
//!
//! As a protoc plugin:
//!
//! ```bash
//! protoc --plugin=protoc-gen-xrpc --xrpc_out=src/gen --xrpc_opt=annotate_code greeter.proto
//! ```
//!
//! From a build script, with descriptors already in hand:
//!
//! ```rust
//! use xrpc_codegen::{FileDescriptor, GeneratorOptions, MethodDescriptor, ServiceDescriptor, TypeRef};
//!
//! let service = ServiceDescriptor::new("acme.greeter.v1", "Greeter").with_method(MethodDescriptor::unary(
//!     "Greet",
//!     TypeRef::new("acme.greeter.v1", "GreetRequest"),
//!     TypeRef::new("acme.greeter.v1", "GreetReply"),
//! ));
//! let file = FileDescriptor::new("acme/greeter/v1/greeter.proto", "acme.greeter.v1").with_service(service);
//!
//! let generated = xrpc_codegen::generate_file(&file, &GeneratorOptions::default()).unwrap();
//! assert_eq!(generated.name, "acme/greeter/v1/greeter_xrpc.rs");
//! assert!(generated.content.contains("pub trait GreeterClientX"));
//! ```

pub mod codegen;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod naming;
pub mod plugin;
pub mod printer;
pub mod proto;

pub use codegen::{GeneratedFile, generate_file};
pub use config::GeneratorOptions;
pub use descriptor::{FileDescriptor, MethodDescriptor, ServiceDescriptor, SourceLocation, TypeRef};
pub use error::{CodegenError, CodegenResult};
pub use printer::Annotation;
