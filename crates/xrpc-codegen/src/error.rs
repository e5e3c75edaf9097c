//! Error types for the generator's collaborators
//!
//! Code generation itself cannot fail; these cover decoding protoc input,
//! parsing options and reading config files.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generator operations
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Error type for generator operations
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Malformed or unknown plugin parameter
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// Config file could not be read
    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has unknown keys
    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Protobuf input could not be decoded
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: prost::DecodeError,
    },

    /// A file listed for generation is not part of the request
    #[error("file to generate `{0}` is missing from the request")]
    MissingFile(String),
}

impl CodegenError {
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        CodegenError::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}
