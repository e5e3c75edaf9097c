//! Generation from a `FileDescriptorSet` on disk

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use xrpc_codegen::GeneratorOptions;
use xrpc_codegen::plugin::{decode_descriptor_set, generate_descriptor_set};
use xrpc_codegen::proto::{TypeIndex, file_from_proto};

pub struct Args {
    pub descriptor_set: PathBuf,
    pub out_dir: PathBuf,
    pub opts: Vec<String>,
    pub dump_model: bool,
    pub files: Vec<String>,
}

pub fn run(args: Args) -> Result<()> {
    let bytes = fs::read(&args.descriptor_set)
        .with_context(|| format!("Failed to read {}", args.descriptor_set.display()))?;
    let set = decode_descriptor_set(&bytes)?;
    let options = GeneratorOptions::from_parameter(Some(args.opts.join(",").as_str()))?;

    if args.dump_model {
        let index = TypeIndex::new(&set.file);
        let model: Vec<_> = set
            .file
            .iter()
            .filter(|file| args.files.is_empty() || args.files.iter().any(|f| f == file.name()))
            .map(|file| file_from_proto(file, &index))
            .collect();
        println!("{}", serde_json::to_string_pretty(&model)?);
        return Ok(());
    }

    let generated = generate_descriptor_set(&set, &args.files, &options)?;
    for file in &generated {
        let path = args.out_dir.join(&file.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Generated {}", path.display());
    }

    if generated.is_empty() {
        tracing::warn!("no services found, nothing generated");
    }
    Ok(())
}
