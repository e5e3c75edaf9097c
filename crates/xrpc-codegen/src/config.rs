//! Generator configuration

use crate::error::{CodegenError, CodegenResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling code generation.
///
/// Set through the protoc parameter string (`--xrpc_opt=annotate_code`) or a
/// TOML file with a `[generator]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Crate that generated code refers to for runtime items
    #[serde(default = "default_runtime_crate")]
    pub runtime_crate: String,

    /// Attach `GeneratedCodeInfo` to generated files
    #[serde(default)]
    pub annotate_code: bool,

    /// Appended to the proto path (minus `.proto`) to name the output file
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,
}

fn default_runtime_crate() -> String {
    "xrpc".to_string()
}

fn default_file_suffix() -> String {
    "_xrpc.rs".to_string()
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            runtime_crate: default_runtime_crate(),
            annotate_code: false,
            file_suffix: default_file_suffix(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    generator: Option<GeneratorOptions>,
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a protoc parameter string such as `annotate_code,runtime_crate=my_rt`.
    ///
    /// A `config=<path>` entry is loaded first regardless of its position; the
    /// other entries are applied on top of it in order.
    pub fn from_parameter(parameter: Option<&str>) -> CodegenResult<Self> {
        let entries: Vec<(&str, Option<&str>)> = parameter
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (entry, None),
            })
            .collect();

        let mut options = Self::default();
        for (key, value) in &entries {
            if *key == "config" {
                let path = value.ok_or_else(|| {
                    CodegenError::invalid_parameter("config", "expected config=<path>")
                })?;
                options = Self::from_file(Path::new(path))?;
            }
        }

        for (key, value) in entries {
            if key != "config" {
                options.set(key, value)?;
            }
        }

        options.validate()?;
        tracing::debug!(?options, "generator options");
        Ok(options)
    }

    /// Load options from the `[generator]` table of a TOML file
    pub fn from_file(path: &Path) -> CodegenResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CodegenError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse options from TOML text; a missing `[generator]` table means defaults
    pub fn from_toml_str(text: &str) -> CodegenResult<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        let options = file.generator.unwrap_or_default();
        options.validate()?;
        Ok(options)
    }

    /// Apply a single `key[=value]` setting
    pub fn set(&mut self, key: &str, value: Option<&str>) -> CodegenResult<()> {
        match key {
            "runtime_crate" => self.runtime_crate = required(key, value)?.to_string(),
            "file_suffix" => self.file_suffix = required(key, value)?.to_string(),
            "annotate_code" => self.annotate_code = parse_bool(key, value)?,
            other => {
                return Err(CodegenError::invalid_parameter(other, "unknown option"));
            }
        }
        Ok(())
    }

    fn validate(&self) -> CodegenResult<()> {
        let valid_crate = !self.runtime_crate.is_empty()
            && self.runtime_crate.split("::").all(|segment| {
                !segment.is_empty()
                    && !segment.starts_with(|c: char| c.is_ascii_digit())
                    && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            });
        if !valid_crate {
            return Err(CodegenError::invalid_parameter(
                format!("runtime_crate={}", self.runtime_crate),
                "expected a crate name or path",
            ));
        }
        if self.file_suffix.is_empty() || self.file_suffix.contains('/') {
            return Err(CodegenError::invalid_parameter(
                format!("file_suffix={}", self.file_suffix),
                "expected a non-empty file name suffix",
            ));
        }
        Ok(())
    }

    /// Path prefix for runtime items in generated code (`::xrpc`)
    pub fn runtime_path(&self) -> String {
        format!("::{}", self.runtime_crate)
    }
}

fn required<'a>(key: &str, value: Option<&'a str>) -> CodegenResult<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CodegenError::invalid_parameter(key, "expected a value"))
}

fn parse_bool(key: &str, value: Option<&str>) -> CodegenResult<bool> {
    match value {
        None | Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(CodegenError::invalid_parameter(
            format!("{key}={other}"),
            "expected true or false",
        )),
    }
}
