//! Conversion from `prost_types` descriptors into the descriptor model.
//!
//! Missing optional fields take their protobuf defaults: not deprecated, not
//! streaming, no comments. Type references that cannot be resolved fall back
//! to a path derived from the raw name.

use crate::descriptor::{
    FileDescriptor, MethodDescriptor, ServiceDescriptor, SourceLocation, TypeRef,
};
use prost_types::{DescriptorProto, FileDescriptorProto};
use std::collections::HashMap;

/// Index of every message type by fully qualified name (`.pkg.Outer.Inner`).
#[derive(Debug, Default, Clone)]
pub struct TypeIndex {
    types: HashMap<String, TypeRef>,
}

impl TypeIndex {
    pub fn new<'a>(files: impl IntoIterator<Item = &'a FileDescriptorProto>) -> Self {
        let mut index = Self::default();
        for file in files {
            let package = file.package();
            index.add_messages(package, "", &file.message_type);
        }
        tracing::trace!(types = index.types.len(), "indexed message types");
        index
    }

    fn add_messages(&mut self, package: &str, outer: &str, messages: &[DescriptorProto]) {
        for message in messages {
            let name = if outer.is_empty() {
                message.name().to_string()
            } else {
                format!("{outer}.{}", message.name())
            };
            self.add_messages(package, &name, &message.nested_type);
            let type_ref = TypeRef::new(package, name);
            self.types.insert(format!(".{}", type_ref.qualified_name()), type_ref);
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve a type name as it appears in `MethodDescriptorProto.input_type`.
    pub fn resolve(&self, type_name: &str) -> TypeRef {
        let key = if type_name.starts_with('.') {
            type_name.to_string()
        } else {
            format!(".{type_name}")
        };
        match self.types.get(&key) {
            Some(type_ref) => type_ref.clone(),
            None => {
                tracing::warn!(type_name, "unresolved message type, deriving path from its name");
                TypeRef::from_qualified(type_name)
            }
        }
    }
}

/// Leading comments by `SourceCodeInfo` path
fn leading_comments(file: &FileDescriptorProto) -> HashMap<Vec<i32>, String> {
    file.source_code_info
        .iter()
        .flat_map(|info| &info.location)
        .filter_map(|location| {
            location
                .leading_comments
                .as_ref()
                .map(|comments| (location.path.clone(), comments.clone()))
        })
        .collect()
}

/// Build the model of one file, resolving types through `index`.
pub fn file_from_proto(file: &FileDescriptorProto, index: &TypeIndex) -> FileDescriptor {
    let comments = leading_comments(file);
    let comment_at = |path: &[i32]| comments.get(path).cloned().unwrap_or_default();
    let package = file.package();

    let mut model = FileDescriptor::new(file.name(), package).with_deprecated(
        file.options
            .as_ref()
            .is_some_and(|options| options.deprecated()),
    );

    for (service_index, service) in file.service.iter().enumerate() {
        let location = SourceLocation::service(file.name(), service_index);
        let mut service_model = ServiceDescriptor::new(package, service.name())
            .with_deprecated(
                service
                    .options
                    .as_ref()
                    .is_some_and(|options| options.deprecated()),
            )
            .with_comments(comment_at(&location.path));
        service_model.location = location;

        for method in &service.method {
            let method_model = MethodDescriptor::unary(
                method.name(),
                index.resolve(method.input_type()),
                index.resolve(method.output_type()),
            )
            .with_streaming(method.client_streaming(), method.server_streaming())
            .with_deprecated(
                method
                    .options
                    .as_ref()
                    .is_some_and(|options| options.deprecated()),
            );
            // with_method assigns [6, s, 2, m] from the service location
            service_model = service_model.with_method(method_model);
        }

        for method in &mut service_model.methods {
            method.leading_comments = comment_at(&method.location.path);
        }
        model.services.push(service_model);
    }

    model
}

#[cfg(test)]
#[path = "proto/proto_tests.rs"]
mod proto_tests;
