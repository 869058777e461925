//! doschema - JSON Schema backward-compatibility CLI tool
//!
//! Checks that a sequence of schema files, given oldest first, never changes
//! the declared type of a field path.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use doschema::{value, Checker, SchemaNode, TypeRegistry};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "doschema", version)]
#[command(about = "Check that evolving JSON Schemas keep their field types")]
struct Cli {
    /// Schema files, oldest version first (.json, .yaml or .yml)
    #[arg(required = true)]
    schemas: Vec<PathBuf>,

    /// Track each position of tuple-style `items` lists separately
    #[arg(long)]
    keep_index: bool,

    /// Output format for the registered field types
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log each schema as it is walked
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("doschema=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let schemas = cli
        .schemas
        .iter()
        .map(|path| value::load_file(path))
        .collect::<doschema::Result<Vec<SchemaNode>>>()?;

    let mut output = io::stdout().lock();
    match checker(&cli).check(&schemas) {
        Ok(registry) => match cli.format {
            Format::Text => print_text(&registry, &mut output)?,
            Format::Json => print_json(&registry, &mut output)?,
        },
        Err(err) => {
            if let (Format::Json, Some(conflict)) = (cli.format, err.as_incompatibility()) {
                print_json(conflict, &mut output)?;
            }
            return Err(err.into());
        }
    }

    Ok(())
}

fn checker(cli: &Cli) -> Checker {
    Checker::builder().ignore_index(!cli.keep_index).build()
}

fn print_text(registry: &TypeRegistry, output: &mut dyn Write) -> io::Result<()> {
    for assertion in registry {
        writeln!(
            output,
            "{}\t{}\tschema {}",
            assertion.path, assertion.declared_type, assertion.origin_schema_index
        )?;
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(
    value: &T,
    output: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(&mut *output, value)?;
    writeln!(output)?;
    Ok(())
}
