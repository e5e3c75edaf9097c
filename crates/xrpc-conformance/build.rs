//! Generates the bindings compiled into this crate.
//!
//! The descriptors are built in code so the crate needs no protoc. They cover
//! the shapes the generator has to handle: unary and streaming methods,
//! deprecation, well-known types, nested and cross-package messages, and a
//! service without any unary method.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use xrpc_codegen::{
    FileDescriptor, GeneratorOptions, MethodDescriptor, ServiceDescriptor, TypeRef, generate_file,
};

const GREETER_PACKAGE: &str = "acme.greeter.v1";
const BILLING_PACKAGE: &str = "acme.billing.v1";

fn greeter(name: &str) -> TypeRef {
    TypeRef::new(GREETER_PACKAGE, name)
}

fn well_known(name: &str) -> TypeRef {
    TypeRef::new("google.protobuf", name)
}

fn greeter_file() -> FileDescriptor {
    let greeter_service = ServiceDescriptor::new(GREETER_PACKAGE, "Greeter")
        .with_comments(" Greeter says hello in several ways.\n")
        .with_method(
            MethodDescriptor::unary("Greet", greeter("GreetRequest"), greeter("GreetReply"))
                .with_comments(" Greet returns a greeting for the given name.\n"),
        )
        .with_method(
            MethodDescriptor::unary("Chat", greeter("GreetRequest"), greeter("GreetReply"))
                .with_streaming(false, true),
        )
        .with_method(
            MethodDescriptor::unary("Farewell", greeter("GreetRequest"), greeter("GreetReply"))
                .with_deprecated(true),
        )
        .with_method(MethodDescriptor::unary(
            "Lookup",
            greeter("GreetRequest"),
            greeter("GreetReply.Detail"),
        ))
        .with_method(MethodDescriptor::unary(
            "Motd",
            well_known("Empty"),
            well_known("StringValue"),
        ))
        .with_method(
            MethodDescriptor::unary("Upload", greeter("GreetRequest"), greeter("GreetReply"))
                .with_streaming(true, false),
        );

    let legacy_service = ServiceDescriptor::new(GREETER_PACKAGE, "LegacyGreeter")
        .with_deprecated(true)
        .with_method(MethodDescriptor::unary(
            "Greet",
            greeter("GreetRequest"),
            greeter("GreetReply"),
        ));

    let watcher_service = ServiceDescriptor::new(GREETER_PACKAGE, "Watcher").with_method(
        MethodDescriptor::unary("Watch", greeter("GreetRequest"), greeter("GreetReply"))
            .with_streaming(true, true),
    );

    FileDescriptor::new("acme/greeter/v1/greeter.proto", GREETER_PACKAGE)
        .with_service(greeter_service)
        .with_service(legacy_service)
        .with_service(watcher_service)
}

fn billing_file() -> FileDescriptor {
    let billing_service = ServiceDescriptor::new(BILLING_PACKAGE, "Billing").with_method(
        MethodDescriptor::unary(
            "Charge",
            TypeRef::new("acme.common.v1", "Money"),
            TypeRef::new(BILLING_PACKAGE, "ChargeReply"),
        ),
    );

    FileDescriptor::new("acme/billing/v1/billing.proto", BILLING_PACKAGE)
        .with_service(billing_service)
}

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").context("OUT_DIR not set")?);
    let options = GeneratorOptions::default();

    for file in [greeter_file(), billing_file()] {
        let generated = generate_file(&file, &options)
            .with_context(|| format!("{} produced no output", file.path))?;
        let path = out_dir.join(&generated.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, generated.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
