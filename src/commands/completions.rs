//! # Completions Command Implementation
//!
//! Prints a shell completion script for `mbed-project` to stdout, generated
//! by `clap_complete` from the CLI definition.
//!
//! ```bash
//! mbed-project completions bash > ~/.local/share/bash-completion/completions/mbed-project
//! mbed-project completions zsh > ~/.zfunc/_mbed-project
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for (bash, zsh, fish, powershell, elvish)
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
