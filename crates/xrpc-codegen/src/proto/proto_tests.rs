#![allow(non_snake_case)]

use super::*;
use prost_types::source_code_info::Location;
use prost_types::{
    MethodDescriptorProto, MethodOptions, ServiceDescriptorProto, ServiceOptions, SourceCodeInfo,
};

fn message(name: &str, nested: Vec<DescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.into()),
        nested_type: nested,
        ..Default::default()
    }
}

fn method(name: &str, input: &str, output: &str) -> MethodDescriptorProto {
    MethodDescriptorProto {
        name: Some(name.into()),
        input_type: Some(input.into()),
        output_type: Some(output.into()),
        ..Default::default()
    }
}

fn comment(path: &[i32], text: &str) -> Location {
    Location {
        path: path.to_vec(),
        leading_comments: Some(text.into()),
        ..Default::default()
    }
}

fn greeter_proto() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("acme/greeter/v1/greeter.proto".into()),
        package: Some("acme.greeter.v1".into()),
        message_type: vec![
            message("GreetRequest", vec![]),
            message("GreetReply", vec![message("Detail", vec![])]),
        ],
        service: vec![ServiceDescriptorProto {
            name: Some("Greeter".into()),
            method: vec![
                method("Greet", ".acme.greeter.v1.GreetRequest", ".acme.greeter.v1.GreetReply"),
                MethodDescriptorProto {
                    server_streaming: Some(true),
                    ..method("Chat", ".acme.greeter.v1.GreetRequest", ".acme.greeter.v1.GreetReply")
                },
                MethodDescriptorProto {
                    options: Some(MethodOptions {
                        deprecated: Some(true),
                        ..Default::default()
                    }),
                    ..method("Old", ".acme.greeter.v1.GreetRequest", ".acme.greeter.v1.GreetReply.Detail")
                },
            ],
            options: Some(ServiceOptions {
                deprecated: Some(false),
                ..Default::default()
            }),
        }],
        source_code_info: Some(SourceCodeInfo {
            location: vec![
                comment(&[6, 0], " The greeting service.\n"),
                comment(&[6, 0, 2, 0], " Greet says hello.\n"),
            ],
        }),
        ..Default::default()
    }
}

#[test]
fn TypeIndex___new___indexes_nested_messages() {
    let proto = greeter_proto();

    let index = TypeIndex::new([&proto]);

    assert_eq!(index.len(), 3);
    assert_eq!(
        index.resolve(".acme.greeter.v1.GreetReply.Detail"),
        TypeRef::new("acme.greeter.v1", "GreetReply.Detail")
    );
}

#[test]
fn TypeIndex___resolve___accepts_names_without_leading_dot() {
    let proto = greeter_proto();
    let index = TypeIndex::new([&proto]);

    assert_eq!(
        index.resolve("acme.greeter.v1.GreetRequest"),
        TypeRef::new("acme.greeter.v1", "GreetRequest")
    );
}

#[test]
fn TypeIndex___resolve___unknown_type_falls_back_to_raw_name() {
    let index = TypeIndex::default();

    assert!(index.is_empty());
    assert_eq!(
        index.resolve(".google.protobuf.Empty"),
        TypeRef::new("google.protobuf", "Empty")
    );
}

#[test]
fn file_from_proto___converts_services_and_methods() {
    let proto = greeter_proto();
    let index = TypeIndex::new([&proto]);

    let file = file_from_proto(&proto, &index);

    assert_eq!(file.path, "acme/greeter/v1/greeter.proto");
    assert_eq!(file.package, "acme.greeter.v1");
    assert!(!file.deprecated);
    let service = &file.services[0];
    assert_eq!(service.qualified_name, "acme.greeter.v1.Greeter");
    assert!(!service.deprecated);
    let names: Vec<&str> = service.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Greet", "Chat", "Old"]);
    assert_eq!(service.methods[0].qualified_name, "acme.greeter.v1.Greeter.Greet");
}

#[test]
fn file_from_proto___reads_flags_with_defaults() {
    let proto = greeter_proto();
    let index = TypeIndex::new([&proto]);

    let file = file_from_proto(&proto, &index);

    let methods = &file.services[0].methods;
    assert!(methods[0].is_unary());
    assert!(!methods[0].deprecated);
    assert!(methods[1].server_streaming);
    assert!(!methods[1].client_streaming);
    assert!(methods[2].deprecated);
    assert_eq!(methods[2].output, TypeRef::new("acme.greeter.v1", "GreetReply.Detail"));
}

#[test]
fn file_from_proto___attaches_comments_and_locations() {
    let proto = greeter_proto();
    let index = TypeIndex::new([&proto]);

    let file = file_from_proto(&proto, &index);

    let service = &file.services[0];
    assert_eq!(service.leading_comments, " The greeting service.\n");
    assert_eq!(service.location.path, vec![6, 0]);
    assert_eq!(service.methods[0].leading_comments, " Greet says hello.\n");
    assert_eq!(service.methods[2].location.path, vec![6, 0, 2, 2]);
    assert_eq!(
        service.methods[2].location.source_file,
        "acme/greeter/v1/greeter.proto"
    );
    assert!(service.methods[1].leading_comments.is_empty());
}

#[test]
fn file_from_proto___deprecated_file_option() {
    let proto = FileDescriptorProto {
        options: Some(prost_types::FileOptions {
            deprecated: Some(true),
            ..Default::default()
        }),
        ..greeter_proto()
    };

    let file = file_from_proto(&proto, &TypeIndex::new([&proto]));

    assert!(file.deprecated);
}
