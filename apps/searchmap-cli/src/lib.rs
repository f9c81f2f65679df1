//! Glue between mapping source files, configuration and the compiler.

use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use searchmap_compiler::MappingCompiler;
use searchmap_core::config::{expand_path, Config};

pub const USAGE: &str =
    "Usage: searchmap compile <mapping.yml> [--out <file>] [--pretty] [--config-dir <dir>]";

/// Arguments of `searchmap compile`. `--out` and `--config-dir` are expanded;
/// the source is resolved by the caller.
#[derive(Debug, Default, PartialEq)]
pub struct CompileArgs {
    pub source: PathBuf,
    pub out: Option<PathBuf>,
    pub pretty: bool,
    pub config_dir: Option<PathBuf>,
}

/// Parses the arguments after the program name. Errors carry the message to
/// print above the usage line.
pub fn parse_args<I>(args: I) -> std::result::Result<CompileArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut iter = args.into_iter();
    if iter.next().as_deref() != Some("compile") {
        return Err("Expected the compile command".to_string());
    }
    let mut source = None;
    let mut parsed = CompileArgs::default();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--pretty" => parsed.pretty = true,
            "--out" | "--config-dir" => {
                let Some(value) = iter.next() else {
                    return Err(format!("Missing value for {arg}"));
                };
                let path = Some(expand_path(value));
                if arg == "--out" {
                    parsed.out = path;
                } else {
                    parsed.config_dir = path;
                }
            }
            _ if source.is_none() => source = Some(arg),
            _ => return Err(format!("Unexpected argument: {arg}")),
        }
    }
    parsed.source = source.map(PathBuf::from).ok_or_else(|| "Missing mapping source".to_string())?;
    Ok(parsed)
}

/// Reads a mapping source: JSON for `.json` files, YAML otherwise.
/// An empty file reads as `null`, which compiles to an empty mapping.
pub fn read_source(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read mapping source {}: {}", path.display(), e))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let value = if is_json {
        serde_json::from_str(&text)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?
    } else {
        serde_yaml::from_str(&text)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?
    };
    Ok(value)
}

/// Compiles one source file with the locales, columns and policies of
/// `config`, returning the mapping tree ready to send to the index.
pub fn compile_file(config: &Config, source: &Path) -> Result<Value> {
    let raw = read_source(source)?;
    let compiler = MappingCompiler::new(config.compile_options()?);
    let introspector = config.introspector()?;
    let document = compiler.compile_with(raw, config, &introspector)?;
    tracing::debug!(source = %source.display(), types = document.len(), "source compiled");
    Ok(document.into_value())
}
