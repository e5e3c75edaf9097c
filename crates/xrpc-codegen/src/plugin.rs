//! protoc plugin protocol.
//!
//! protoc writes a serialized `CodeGeneratorRequest` to the plugin's stdin and
//! reads a `CodeGeneratorResponse` from its stdout. Errors in the request or
//! its parameters are reported through `CodeGeneratorResponse.error`, which
//! protoc prints and turns into a failed run.

use crate::codegen::{GeneratedFile, generate_file};
use crate::config::GeneratorOptions;
use crate::error::{CodegenError, CodegenResult};
use crate::proto::{TypeIndex, file_from_proto};
use prost::Message;
use prost_types::FileDescriptorSet;
use prost_types::compiler::code_generator_response::{self, Feature};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse, Version};
use prost_types::generated_code_info;

/// Features this plugin declares to protoc
pub const SUPPORTED_FEATURES: u64 = Feature::Proto3Optional as u64;

/// Decode a request read from stdin
pub fn decode_request(bytes: &[u8]) -> CodegenResult<CodeGeneratorRequest> {
    CodeGeneratorRequest::decode(bytes).map_err(|source| CodegenError::Decode {
        what: "CodeGeneratorRequest",
        source,
    })
}

/// Decode a serialized `FileDescriptorSet` (`protoc --descriptor_set_out`)
pub fn decode_descriptor_set(bytes: &[u8]) -> CodegenResult<FileDescriptorSet> {
    FileDescriptorSet::decode(bytes).map_err(|source| CodegenError::Decode {
        what: "FileDescriptorSet",
        source,
    })
}

/// Answer a protoc request.
///
/// Never fails: problems end up in the response's `error` field.
pub fn generate(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let result = GeneratorOptions::from_parameter(request.parameter.as_deref())
        .and_then(|options| try_generate(request, &options).map(|files| (options, files)));

    match result {
        Ok((options, files)) => CodeGeneratorResponse {
            supported_features: Some(SUPPORTED_FEATURES),
            file: files
                .into_iter()
                .map(|file| to_response_file(file, options.annotate_code))
                .collect(),
            ..Default::default()
        },
        Err(err) => {
            tracing::error!(error = %err, "generation failed");
            CodeGeneratorResponse {
                error: Some(err.to_string()),
                supported_features: Some(SUPPORTED_FEATURES),
                ..Default::default()
            }
        }
    }
}

/// Generate the files listed in `file_to_generate`, in that order.
pub fn try_generate(
    request: &CodeGeneratorRequest,
    options: &GeneratorOptions,
) -> CodegenResult<Vec<GeneratedFile>> {
    let index = TypeIndex::new(&request.proto_file);
    let compiler = request.compiler_version.as_ref().map(format_version);

    let mut generated = Vec::new();
    for name in &request.file_to_generate {
        let proto = request
            .proto_file
            .iter()
            .find(|file| file.name() == name.as_str())
            .ok_or_else(|| CodegenError::MissingFile(name.clone()))?;

        let mut file = file_from_proto(proto, &index);
        file.compiler_version = compiler.clone();
        if let Some(output) = generate_file(&file, options) {
            tracing::info!(file = %output.name, "generated");
            generated.push(output);
        }
    }
    Ok(generated)
}

/// Generate from a descriptor set without protoc.
///
/// `files` selects which files to generate; empty means every file in the set.
pub fn generate_descriptor_set(
    set: &FileDescriptorSet,
    files: &[String],
    options: &GeneratorOptions,
) -> CodegenResult<Vec<GeneratedFile>> {
    let request = CodeGeneratorRequest {
        file_to_generate: if files.is_empty() {
            set.file.iter().map(|file| file.name().to_string()).collect()
        } else {
            files.to_vec()
        },
        proto_file: set.file.clone(),
        ..Default::default()
    };
    try_generate(&request, options)
}

/// `v3.21.12`, or `v4.0.0-rc1` with a suffix
pub fn format_version(version: &Version) -> String {
    let mut formatted = format!(
        "v{}.{}.{}",
        version.major(),
        version.minor(),
        version.patch()
    );
    if !version.suffix().is_empty() {
        formatted.push('-');
        formatted.push_str(version.suffix());
    }
    formatted
}

fn to_response_file(file: GeneratedFile, annotate: bool) -> code_generator_response::File {
    let generated_code_info = annotate.then(|| prost_types::GeneratedCodeInfo {
        annotation: file
            .annotations
            .iter()
            .map(|annotation| generated_code_info::Annotation {
                path: annotation.location.path.clone(),
                source_file: Some(annotation.location.source_file.clone()),
                begin: Some(offset_to_i32(annotation.begin)),
                end: Some(offset_to_i32(annotation.end)),
                ..Default::default()
            })
            .collect(),
    });

    code_generator_response::File {
        name: Some(file.name),
        content: Some(file.content),
        generated_code_info,
        ..Default::default()
    }
}

fn offset_to_i32(offset: usize) -> i32 {
    i32::try_from(offset).unwrap_or(i32::MAX)
}
