//! # Libs Command Implementation
//!
//! Lists every library reference in a program, resolved or not. This is a
//! read-only command; nothing is fetched.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use mbed_project::git::GitClient;
use mbed_project::output::{render_json, render_text, LibraryRecord, OutputConfig};
use mbed_project::program::Program;

/// List the libraries of an Mbed program
#[derive(Args, Debug)]
pub struct LibsArgs {
    /// A directory inside the program. Defaults to the current directory.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human readable table
    #[default]
    Text,
    /// JSON array, one object per library
    Json,
}

/// Execute the `libs` command.
pub fn execute(args: LibsArgs, output: &OutputConfig) -> Result<()> {
    let program = Program::open_existing(&args.path, Box::new(GitClient::new()))?;

    let records = program
        .list_known_dependencies()
        .iter()
        .map(|lib| {
            LibraryRecord::from_library(lib, program.root()).with_context(|| {
                format!("Failed to read reference file {}", lib.reference_file.display())
            })
        })
        .collect::<Result<Vec<_>>>()?;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&records, output)),
        OutputFormat::Json => println!("{}", render_json(&records)?),
    }
    Ok(())
}
