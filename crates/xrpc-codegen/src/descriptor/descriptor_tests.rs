#![allow(non_snake_case)]

use super::*;
use proptest::prelude::*;
use test_case::test_case;

fn msg(name: &str) -> TypeRef {
    TypeRef::new("acme.greeter.v1", name)
}

fn greeter() -> ServiceDescriptor {
    ServiceDescriptor::new("acme.greeter.v1", "Greeter")
        .with_method(MethodDescriptor::unary("Greet", msg("GreetRequest"), msg("GreetReply")))
        .with_method(
            MethodDescriptor::unary("Chat", msg("ChatRequest"), msg("ChatReply"))
                .with_streaming(false, true),
        )
        .with_method(
            MethodDescriptor::unary("Upload", msg("Chunk"), msg("Summary"))
                .with_streaming(true, false),
        )
        .with_method(
            MethodDescriptor::unary("Talk", msg("ChatRequest"), msg("ChatReply"))
                .with_streaming(true, true),
        )
        .with_method(MethodDescriptor::unary("Farewell", msg("GreetRequest"), msg("GreetReply")))
}

// ============================================================================
// Method filter
// ============================================================================

#[test]
fn ServiceDescriptor___unary_methods___excludes_every_streaming_shape() {
    let service = greeter();

    let names: Vec<&str> = service
        .unary_methods()
        .iter()
        .map(|m| m.name.as_str())
        .collect();

    assert_eq!(names, vec!["Greet", "Farewell"]);
}

#[test]
fn ServiceDescriptor___unary_methods___empty_service_yields_nothing() {
    let service = ServiceDescriptor::new("acme.v1", "Empty");

    assert!(service.unary_methods().is_empty());
}

proptest! {
    #[test]
    fn ServiceDescriptor___unary_methods___keeps_exactly_unary_in_order(
        flags in prop::collection::vec((any::<bool>(), any::<bool>()), 0..12)
    ) {
        let mut service = ServiceDescriptor::new("p", "S");
        for (i, (cs, ss)) in flags.iter().enumerate() {
            service = service.with_method(
                MethodDescriptor::unary(format!("M{i}"), msg("In"), msg("Out")).with_streaming(*cs, *ss),
            );
        }

        let kept: Vec<String> = service.unary_methods().iter().map(|m| m.name.clone()).collect();
        let expected: Vec<String> = flags
            .iter()
            .enumerate()
            .filter(|(_, (cs, ss))| !cs && !ss)
            .map(|(i, _)| format!("M{i}"))
            .collect();

        prop_assert_eq!(kept, expected);
    }
}

// ============================================================================
// Paths and names
// ============================================================================

#[test]
fn ServiceDescriptor___method_path___joins_service_and_method() {
    let service = greeter();

    assert_eq!(
        service.method_path(&service.methods[0]),
        "acme.greeter.v1.Greeter/Greet"
    );
    assert_eq!(service.mount_path(), "/acme.greeter.v1.Greeter/");
}

#[test]
fn ServiceDescriptor___new___without_package_uses_bare_name() {
    let service = ServiceDescriptor::new("", "Greeter");

    assert_eq!(service.qualified_name, "Greeter");
    assert_eq!(service.mount_path(), "/Greeter/");
}

#[test]
fn ServiceDescriptor___with_method___qualifies_method_name() {
    let service = greeter();

    assert_eq!(service.methods[0].qualified_name, "acme.greeter.v1.Greeter.Greet");
}

#[test]
fn FileDescriptor___with_service___assigns_source_locations() {
    let file = FileDescriptor::new("greeter.proto", "acme.greeter.v1")
        .with_service(ServiceDescriptor::new("acme.greeter.v1", "First"))
        .with_service(greeter());

    let service = &file.services[1];
    assert_eq!(service.location.path, vec![6, 1]);
    assert_eq!(service.location.source_file, "greeter.proto");
    assert_eq!(service.methods[4].location.path, vec![6, 1, 2, 4]);
}

// ============================================================================
// Type paths
// ============================================================================

#[test_case("acme.greeter.v1", "GreetRequest", "acme.greeter.v1", "GreetRequest" ; "same package")]
#[test_case("acme.greeter.v1", "Outer.Inner", "acme.greeter.v1", "outer::Inner" ; "nested message")]
#[test_case("acme.common.v1", "Money", "acme.greeter.v1", "super::super::common::v1::Money" ; "sibling package")]
#[test_case("acme.greeter.v1.types", "Name", "acme.greeter.v1", "types::Name" ; "child package")]
#[test_case("acme", "Root", "acme.greeter.v1", "super::super::Root" ; "parent package")]
#[test_case("", "Bare", "acme", "super::Bare" ; "no package")]
#[test_case("acme.v1", "HTTPRequest", "acme.v1", "HttpRequest" ; "prost type casing")]
#[test_case("acme.v1", "Match.Type", "acme.v1", "r#match::Type" ; "keyword module")]
fn TypeRef___rust_path___resolves_relative_to_package(
    package: &str,
    name: &str,
    from: &str,
    expected: &str,
) {
    assert_eq!(TypeRef::new(package, name).rust_path(from), expected);
}

#[test_case("Empty", "()" ; "empty is unit")]
#[test_case("StringValue", "::prost::alloc::string::String" ; "string wrapper")]
#[test_case("Int64Value", "i64" ; "int wrapper")]
#[test_case("Timestamp", "::prost_types::Timestamp" ; "timestamp")]
#[test_case("Any", "::prost_types::Any" ; "any")]
fn TypeRef___rust_path___maps_well_known_types(name: &str, expected: &str) {
    assert_eq!(
        TypeRef::new(WELL_KNOWN_PACKAGE, name).rust_path("acme.v1"),
        expected
    );
}

#[test]
fn TypeRef___from_qualified___splits_on_last_dot() {
    let ty = TypeRef::from_qualified(".acme.v1.GreetRequest");

    assert_eq!(ty, TypeRef::new("acme.v1", "GreetRequest"));
    assert_eq!(ty.qualified_name(), "acme.v1.GreetRequest");
}
