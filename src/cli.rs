//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use mbed_project::output::OutputConfig;

use crate::commands;

/// Mbed Project - Create, clone and synchronise Mbed programs and their libraries
#[derive(Parser, Debug)]
#[command(name = "mbed-project")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        env = "MBED_PROJECT_LOG",
        default_value = "info"
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new Mbed program and fetch Mbed OS
    Init(commands::init::InitArgs),

    /// Clone an Mbed program and fetch its libraries
    Clone(commands::clone::CloneArgs),

    /// List the libraries of an Mbed program
    Libs(commands::libs::LibsArgs),

    /// Check out pinned library revisions and fetch missing libraries
    Checkout(commands::checkout::CheckoutArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Init(args) => commands::init::execute(args),
            Commands::Clone(args) => commands::clone::execute(args),
            Commands::Libs(args) => commands::libs::execute(args, &output),
            Commands::Checkout(args) => commands::checkout::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Logs go to stderr. `RUST_LOG`, when set, takes precedence over `--log-level`.
fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.format_timestamp(None).format_target(false);
    match std::env::var("RUST_LOG") {
        Ok(filters) if !filters.is_empty() => {
            builder.parse_filters(&filters);
        }
        _ => {
            builder.parse_filters(level);
        }
    }
    // Only fails if a logger is already installed.
    let _ = builder.try_init();
}
