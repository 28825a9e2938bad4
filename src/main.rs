//! # Mbed Project CLI
//!
//! Binary entry point for the `mbed-project` command-line tool. It parses
//! arguments with `clap` and dispatches to the command modules; all program
//! and dependency handling lives in the `mbed_project` library.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
