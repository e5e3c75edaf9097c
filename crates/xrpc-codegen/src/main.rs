//! protoc-gen-xrpc - protoc plugin generating xrpc bindings
//!
//! Modes:
//! - no arguments: protoc plugin, `CodeGeneratorRequest` on stdin, response on stdout
//! - `--descriptor-set FILE`: generate from a `FileDescriptorSet` without protoc

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{Read, Write};
use std::path::PathBuf;

mod logging;
mod offline;

#[derive(Parser)]
#[command(name = "protoc-gen-xrpc")]
#[command(author, version, about = "Generate xrpc client and server bindings", long_about = None)]
struct Cli {
    /// Read a serialized FileDescriptorSet instead of a protoc request on stdin
    #[arg(long, value_name = "FILE")]
    descriptor_set: Option<PathBuf>,

    /// Output directory for generated files (descriptor-set mode)
    #[arg(short, long, default_value = ".", requires = "descriptor_set")]
    out_dir: PathBuf,

    /// Generator option as key=value (may be repeated)
    #[arg(long = "opt", value_name = "KEY[=VALUE]", requires = "descriptor_set")]
    opts: Vec<String>,

    /// Print the descriptor model as JSON instead of generating code
    #[arg(long, requires = "descriptor_set")]
    dump_model: bool,

    /// Proto files to generate (default: every file in the descriptor set)
    #[arg(requires = "descriptor_set")]
    files: Vec<String>,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.descriptor_set {
        None => run_plugin(),
        Some(descriptor_set) => offline::run(offline::Args {
            descriptor_set,
            out_dir: cli.out_dir,
            opts: cli.opts,
            dump_model: cli.dump_model,
            files: cli.files,
        }),
    }
}

fn run_plugin() -> Result<()> {
    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .context("Failed to read CodeGeneratorRequest from stdin")?;

    let request = xrpc_codegen::plugin::decode_request(&input)?;
    tracing::debug!(files = ?request.file_to_generate, "received request");
    let response = xrpc_codegen::plugin::generate(&request);

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&prost::Message::encode_to_vec(&response))
        .context("Failed to write CodeGeneratorResponse to stdout")?;
    stdout.flush()?;
    Ok(())
}
