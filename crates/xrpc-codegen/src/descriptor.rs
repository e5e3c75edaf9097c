//! Descriptor model consumed by the generators.
//!
//! This is a simplified, read-only view of protobuf service descriptors. It is
//! built either from `prost_types` descriptors (see [`crate::proto`]) or
//! directly with the builder methods below, which is what the tests do.
//!
//! # Structure
//!
//! - [`FileDescriptor`]: one `.proto` file and the services it declares
//! - [`ServiceDescriptor`]: a service and its methods in declaration order
//! - [`MethodDescriptor`]: one RPC with its input/output types and streaming flags
//! - [`TypeRef`]: a message type, rendered as a prost-style Rust path
//! - [`SourceLocation`]: where a descriptor came from, for code annotations

use crate::naming::{sanitize_ident, to_snake_case, to_upper_camel_case};
use serde::Serialize;

/// `FileDescriptorProto.service` field number
pub const FILE_SERVICE_FIELD: i32 = 6;

/// `ServiceDescriptorProto.method` field number
pub const SERVICE_METHOD_FIELD: i32 = 2;

/// Origin of a descriptor inside a `.proto` file.
///
/// `path` follows `SourceCodeInfo.Location.path`: `[6, s]` for service `s`,
/// `[6, s, 2, m]` for method `m` of that service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    pub source_file: String,
    pub path: Vec<i32>,
}

impl SourceLocation {
    pub fn service(source_file: &str, service_index: usize) -> Self {
        Self {
            source_file: source_file.to_string(),
            path: vec![FILE_SERVICE_FIELD, index_to_i32(service_index)],
        }
    }

    pub fn method(source_file: &str, service_index: usize, method_index: usize) -> Self {
        Self {
            source_file: source_file.to_string(),
            path: vec![
                FILE_SERVICE_FIELD,
                index_to_i32(service_index),
                SERVICE_METHOD_FIELD,
                index_to_i32(method_index),
            ],
        }
    }
}

fn index_to_i32(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

/// Reference to a protobuf message type.
///
/// `name` is the dotted path inside the package, so nested messages look like
/// `Outer.Inner`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeRef {
    pub package: String,
    pub name: String,
}

/// Package of the protobuf well-known types
pub const WELL_KNOWN_PACKAGE: &str = "google.protobuf";

impl TypeRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Build a reference from a fully qualified name (`.pkg.Message` or `pkg.Message`).
    ///
    /// The last segment is taken as the message name. Use this only when no
    /// type index is available; nested messages cannot be told apart from
    /// package segments here.
    pub fn from_qualified(qualified: &str) -> Self {
        let qualified = qualified.trim_start_matches('.');
        match qualified.rsplit_once('.') {
            Some((package, name)) => Self::new(package, name),
            None => Self::new("", qualified),
        }
    }

    /// Fully qualified protobuf name without a leading dot
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    /// Rust path of this type as seen from the module generated for `from_package`.
    ///
    /// Messages are laid out the way prost lays them out: one module per
    /// package segment, one snake_case module per enclosing message, and an
    /// UpperCamelCase type. Well-known types map to `prost-types` or to Rust
    /// primitives.
    pub fn rust_path(&self, from_package: &str) -> String {
        if self.package == WELL_KNOWN_PACKAGE
            && let Some(path) = well_known_path(&self.name)
        {
            return path;
        }

        let local: Vec<&str> = split_package(from_package);
        let target: Vec<&str> = split_package(&self.package);
        let mut messages: Vec<&str> = self.name.split('.').collect();
        let ident = messages.pop().unwrap_or_default();

        let common = local
            .iter()
            .zip(&target)
            .take_while(|(a, b)| a == b)
            .count();

        let mut segments: Vec<String> = Vec::new();
        segments.extend(std::iter::repeat_n("super".to_string(), local.len() - common));
        segments.extend(
            target[common..]
                .iter()
                .map(|segment| sanitize_ident(&to_snake_case(segment))),
        );
        segments.extend(
            messages
                .iter()
                .map(|outer| sanitize_ident(&to_snake_case(outer))),
        );
        segments.push(message_ident(ident));
        segments.join("::")
    }
}

fn split_package(package: &str) -> Vec<&str> {
    package.split('.').filter(|s| !s.is_empty()).collect()
}

fn message_ident(name: &str) -> String {
    let ident = to_upper_camel_case(name);
    if ident == "Self" {
        format!("{ident}_")
    } else {
        ident
    }
}

fn well_known_path(name: &str) -> Option<String> {
    let path = match name {
        "Empty" => "()",
        "BoolValue" => "bool",
        "BytesValue" => "::prost::alloc::vec::Vec<u8>",
        "DoubleValue" => "f64",
        "FloatValue" => "f32",
        "Int32Value" => "i32",
        "Int64Value" => "i64",
        "StringValue" => "::prost::alloc::string::String",
        "UInt32Value" => "u32",
        "UInt64Value" => "u64",
        // Nested well-known messages have no prost-types counterpart at the top level
        nested if nested.contains('.') => return None,
        other => return Some(format!("::prost_types::{}", to_upper_camel_case(other))),
    };
    Some(path.to_string())
}

/// One RPC method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    /// Name as declared in the IDL (`Greet`)
    pub name: String,
    /// `package.Service.Method`
    pub qualified_name: String,
    pub input: TypeRef,
    pub output: TypeRef,
    pub client_streaming: bool,
    pub server_streaming: bool,
    pub deprecated: bool,
    pub leading_comments: String,
    pub location: SourceLocation,
}

impl MethodDescriptor {
    /// A non-streaming, non-deprecated method.
    ///
    /// `qualified_name` is filled in when the method is added to a service.
    pub fn unary(name: impl Into<String>, input: TypeRef, output: TypeRef) -> Self {
        let name = name.into();
        Self {
            qualified_name: name.clone(),
            name,
            input,
            output,
            client_streaming: false,
            server_streaming: false,
            deprecated: false,
            leading_comments: String::new(),
            location: SourceLocation::default(),
        }
    }

    pub fn with_streaming(mut self, client_streaming: bool, server_streaming: bool) -> Self {
        self.client_streaming = client_streaming;
        self.server_streaming = server_streaming;
        self
    }

    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.leading_comments = comments.into();
        self
    }

    /// Exactly one request and one response
    pub fn is_unary(&self) -> bool {
        !self.client_streaming && !self.server_streaming
    }
}

/// One service and its methods in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    /// Name as declared in the IDL (`Greeter`)
    pub name: String,
    /// `package.Service`
    pub qualified_name: String,
    pub package: String,
    pub methods: Vec<MethodDescriptor>,
    pub deprecated: bool,
    pub leading_comments: String,
    pub location: SourceLocation,
}

impl ServiceDescriptor {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        let package = package.into();
        let name = name.into();
        Self {
            qualified_name: qualify(&package, &name),
            name,
            package,
            methods: Vec::new(),
            deprecated: false,
            leading_comments: String::new(),
            location: SourceLocation::default(),
        }
    }

    /// Append a method, qualifying its name and assigning its source location.
    pub fn with_method(mut self, mut method: MethodDescriptor) -> Self {
        method.qualified_name = format!("{}.{}", self.qualified_name, method.name);
        if let Some(&service_index) = self.location.path.get(1) {
            method.location = SourceLocation {
                source_file: self.location.source_file.clone(),
                path: vec![
                    FILE_SERVICE_FIELD,
                    service_index,
                    SERVICE_METHOD_FIELD,
                    index_to_i32(self.methods.len()),
                ],
            };
        }
        self.methods.push(method);
        self
    }

    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.leading_comments = comments.into();
        self
    }

    /// Methods the generators bind, in declaration order.
    ///
    /// Streaming methods (client, server or bidirectional) are left out.
    pub fn unary_methods(&self) -> Vec<&MethodDescriptor> {
        self.methods
            .iter()
            .filter(|method| {
                if !method.is_unary() {
                    tracing::trace!(
                        method = %method.qualified_name,
                        client_streaming = method.client_streaming,
                        server_streaming = method.server_streaming,
                        "skipping streaming method"
                    );
                }
                method.is_unary()
            })
            .collect()
    }

    /// Route of `method` without the leading slash: `package.Service/Method`.
    ///
    /// Client URLs and server routes are both built from this.
    pub fn method_path(&self, method: &MethodDescriptor) -> String {
        format!("{}/{}", self.qualified_name, method.name)
    }

    /// Path the service's router is mounted on: `/package.Service/`
    pub fn mount_path(&self) -> String {
        format!("/{}/", self.qualified_name)
    }
}

fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}

/// One `.proto` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    /// Path relative to the proto root (`acme/greeter/v1/greeter.proto`)
    pub path: String,
    pub package: String,
    pub deprecated: bool,
    pub services: Vec<ServiceDescriptor>,
    /// Version of the compiler that parsed the file, e.g. `v3.21.12`
    pub compiler_version: Option<String>,
}

impl FileDescriptor {
    pub fn new(path: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            package: package.into(),
            deprecated: false,
            services: Vec::new(),
            compiler_version: None,
        }
    }

    /// Append a service, assigning source locations to it and its methods.
    pub fn with_service(mut self, mut service: ServiceDescriptor) -> Self {
        let service_index = self.services.len();
        service.location = SourceLocation::service(&self.path, service_index);
        for (method_index, method) in service.methods.iter_mut().enumerate() {
            method.location = SourceLocation::method(&self.path, service_index, method_index);
        }
        self.services.push(service);
        self
    }

    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn with_compiler_version(mut self, version: impl Into<String>) -> Self {
        self.compiler_version = Some(version.into());
        self
    }
}

#[cfg(test)]
#[path = "descriptor/descriptor_tests.rs"]
mod descriptor_tests;
