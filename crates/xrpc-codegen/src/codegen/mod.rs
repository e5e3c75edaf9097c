//! Rust binding generation for unary services.
//!
//! One generated file per `.proto` file with at least one service. For each
//! service the generators emit, in this order:
//!
//! ```text
//! FileDescriptor
//!     ↓
//!  [File preamble]   header, package, compatibility assertion
//!     ↓
//!  for each service (unary methods only):
//!  ├─→ [Client generator]  <Service>ClientX, <service>ClientX, New<Service>ClientX
//!  ├─→ [Server generator]  <Service>ServerX, New<Service>HandlerX
//!  └─→ [Shim generator]    Unimplemented<Service>ServerX
//! ```
//!
//! The output is meant to be `include!`d into the module prost generated for
//! the file's package, so message types are referenced by prost paths.
//!
//! Generation is a pure function of its input: no clocks, no hashing, no
//! iteration over unordered maps. Running it twice gives identical bytes.

mod client;
mod server;
mod shim;

use crate::config::GeneratorOptions;
use crate::descriptor::{FileDescriptor, MethodDescriptor, ServiceDescriptor};
use crate::naming::{FRAMEWORK_SUFFIX, decapitalize, method_ident, to_pascal_case};
use crate::printer::{Annotation, Printer};
use serde::Serialize;

/// Name of the generator as it appears in file headers
pub const GENERATOR_NAME: &str = "protoc-gen-xrpc";

/// Version of the generator as it appears in file headers
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runtime capability the generated code requires
pub const RUNTIME_CAPABILITY: &str = "SUPPORTS_CODEGEN_V0";

/// Oldest runtime release that provides [`RUNTIME_CAPABILITY`]
pub const MIN_RUNTIME_VERSION: &str = "0.1.0";

/// Doc line added to deprecated services and methods
pub const DEPRECATION_NOTICE: &str = "Deprecated: do not use.";

/// A generated source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Output path relative to the output directory
    pub name: String,
    pub content: String,
    pub annotations: Vec<Annotation>,
}

/// Output file name for a proto path: `a/b.proto` -> `a/b<suffix>`
pub fn output_file_name(proto_path: &str, suffix: &str) -> String {
    let stem = proto_path.strip_suffix(".proto").unwrap_or(proto_path);
    format!("{stem}{suffix}")
}

/// Generate bindings for every service in `file`.
///
/// Returns `None` when the file declares no services.
pub fn generate_file(file: &FileDescriptor, options: &GeneratorOptions) -> Option<GeneratedFile> {
    if file.services.is_empty() {
        tracing::debug!(file = %file.path, "no services, nothing to generate");
        return None;
    }

    let rt = options.runtime_path();
    let mut p = Printer::new();

    generate_preamble(file, options, &mut p);
    generate_handshake(options, &rt, &mut p);

    for service in &file.services {
        let cx = ServiceContext::new(file, service, &rt);
        tracing::debug!(
            service = %service.qualified_name,
            methods = cx.methods.len(),
            skipped = service.methods.len() - cx.methods.len(),
            "generating service"
        );
        client::generate(&cx, &mut p);
        server::generate(&cx, &mut p);
        shim::generate(&cx, &mut p);
    }

    let (content, annotations) = p.finish();
    Some(GeneratedFile {
        name: output_file_name(&file.path, &options.file_suffix),
        content,
        annotations,
    })
}

fn generate_preamble(file: &FileDescriptor, options: &GeneratorOptions, p: &mut Printer) {
    let compiler = file.compiler_version.as_deref().unwrap_or("(unknown)");
    let runtime = &options.runtime_crate;
    let width = [GENERATOR_NAME.len(), runtime.len(), "protoc".len()]
        .into_iter()
        .max()
        .unwrap_or_default();

    p.line(format!("// Code generated by {GENERATOR_NAME}. DO NOT EDIT."));
    p.line("// versions:");
    p.line(format!("// - {GENERATOR_NAME:<width$} v{GENERATOR_VERSION}"));
    p.line(format!("// - {runtime:<width$} v{MIN_RUNTIME_VERSION}"));
    p.line(format!("// - {:<width$} {compiler}", "protoc"));
    if file.deprecated {
        p.line(format!("// {} is a deprecated file.", file.path));
    } else {
        p.line(format!("// source: {}", file.path));
    }
    p.blank();
    p.line(format!("// package: {}", file.package));
    p.blank();
}

fn generate_handshake(options: &GeneratorOptions, rt: &str, p: &mut Printer) {
    let runtime = &options.runtime_crate;
    p.comment(&format!(
        "This is a compile-time assertion to ensure that this generated file and the \
         {runtime} crate are compatible. If you get a compiler error that this constant \
         isn't defined, this code was generated with a version of {runtime} newer than \
         the one compiled into your binary. You can fix the problem by either \
         regenerating this code with an older version of {runtime} or updating the \
         {runtime} version compiled into your binary."
    ));
    p.line(format!(
        "const _: bool = {rt}::{RUNTIME_CAPABILITY}; // requires {runtime} v{MIN_RUNTIME_VERSION} or later"
    ));
    p.blank();
}

/// Identifiers generated for one service
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceNames {
    /// `GreeterClientX`
    pub client_trait: String,
    /// `greeterClientX`
    pub client_struct: String,
    /// `NewGreeterClientX`
    pub client_ctor: String,
    /// `GreeterServerX`
    pub server_trait: String,
    /// `NewGreeterHandlerX`
    pub handler_ctor: String,
    /// `UnimplementedGreeterServerX`
    pub shim: String,
    /// `mustEmbedUnimplementedGreeterServerX`
    pub marker: String,
}

impl ServiceNames {
    pub fn new(service: &ServiceDescriptor) -> Self {
        let base = to_pascal_case(&service.name);
        let client_trait = format!("{base}Client{FRAMEWORK_SUFFIX}");
        let server_trait = format!("{base}Server{FRAMEWORK_SUFFIX}");
        let shim = format!("Unimplemented{server_trait}");
        Self {
            client_struct: decapitalize(&client_trait),
            client_ctor: format!("New{client_trait}"),
            handler_ctor: format!("New{base}Handler{FRAMEWORK_SUFFIX}"),
            marker: format!("mustEmbed{shim}"),
            client_trait,
            server_trait,
            shim,
        }
    }
}

/// Everything the per-service generators need, computed once.
pub(crate) struct ServiceContext<'a> {
    pub file: &'a FileDescriptor,
    pub service: &'a ServiceDescriptor,
    /// Eligible methods in declaration order
    pub methods: Vec<&'a MethodDescriptor>,
    pub names: ServiceNames,
    /// Runtime path prefix (`::xrpc`)
    pub rt: &'a str,
}

impl<'a> ServiceContext<'a> {
    pub fn new(file: &'a FileDescriptor, service: &'a ServiceDescriptor, rt: &'a str) -> Self {
        let methods = service.unary_methods();
        for (ident, names) in colliding_idents(&methods) {
            tracing::warn!(
                service = %service.qualified_name,
                %ident,
                methods = ?names,
                "methods map to the same Rust identifier, generated code will not compile"
            );
        }
        Self {
            file,
            service,
            methods,
            names: ServiceNames::new(service),
            rt,
        }
    }

    pub fn input_type(&self, method: &MethodDescriptor) -> String {
        method.input.rust_path(&self.file.package)
    }

    pub fn output_type(&self, method: &MethodDescriptor) -> String {
        method.output.rust_path(&self.file.package)
    }

    pub fn method_ident(&self, method: &MethodDescriptor) -> String {
        method_ident(&method.name)
    }

    /// `::std::result::Result<Output, ::xrpc::Error>`
    pub fn result_type(&self, method: &MethodDescriptor) -> String {
        format!(
            "::std::result::Result<{}, {}::Error>",
            self.output_type(method),
            self.rt
        )
    }

    /// Leading comments and the deprecation notice for a trait entry
    pub fn method_docs(&self, method: &MethodDescriptor, p: &mut Printer) {
        let has_comments = !method.leading_comments.trim().is_empty();
        if has_comments {
            p.doc_lines(&method.leading_comments);
        }
        if method.deprecated {
            if has_comments {
                p.line("///");
            }
            p.doc(DEPRECATION_NOTICE);
        }
    }

    /// Service leading comments, separated from the summary line
    pub fn service_comments(&self, p: &mut Printer) {
        if !self.service.leading_comments.trim().is_empty() {
            p.line("///");
            p.doc_lines(&self.service.leading_comments);
        }
    }

    /// Deprecation notice for service-level declarations
    pub fn service_deprecation(&self, p: &mut Printer) {
        if self.service.deprecated {
            p.line("///");
            p.doc(DEPRECATION_NOTICE);
        }
    }

    /// Trailing `// fully-qualified ...` argument lines shared by client and handler constructors
    pub fn identity_args(&self, method: &MethodDescriptor, p: &mut Printer) {
        p.line(format!(
            "\"{}\", // fully-qualified protobuf method",
            method.qualified_name
        ));
        p.line(format!(
            "\"{}\", // fully-qualified protobuf service",
            self.service.qualified_name
        ));
        p.line(format!(
            "\"{}\", // fully-qualified protobuf package",
            self.service.package
        ));
    }
}

/// Rust method identifiers claimed by more than one method, with the RPC names
/// claiming them, in order of first appearance
pub(crate) fn colliding_idents(methods: &[&MethodDescriptor]) -> Vec<(String, Vec<String>)> {
    let mut claimed: Vec<(String, Vec<String>)> = Vec::new();
    for method in methods {
        let ident = method_ident(&method.name);
        match claimed.iter_mut().find(|(existing, _)| *existing == ident) {
            Some((_, names)) => names.push(method.name.clone()),
            None => claimed.push((ident, vec![method.name.clone()])),
        }
    }
    claimed.retain(|(_, names)| names.len() > 1);
    claimed
}
