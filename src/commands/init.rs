//! # Init Command Implementation
//!
//! Creates a new Mbed program: the `.mbed` marker, an empty `mbed_app.json`,
//! an `mbed-os.lib` pointing at the default Mbed OS repository and a fresh
//! git repository. Mbed OS itself is fetched unless `--create-only` is given.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use mbed_project::git::GitClient;
use mbed_project::progress::ProgressBarObserver;
use mbed_project::project;

use super::ResolveArgs;

/// Create a new Mbed program
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to create the program in. Created if it does not exist.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Only write the program files; do not fetch Mbed OS.
    #[arg(long)]
    pub create_only: bool,

    #[command(flatten)]
    pub resolve: ResolveArgs,
}

/// Execute the `init` command.
pub fn execute(args: InitArgs) -> Result<()> {
    let progress = ProgressBarObserver::new();
    let program = project::initialise_project(
        &args.path,
        args.create_only,
        Box::new(GitClient::new()),
        &progress,
        args.resolve.options(),
    )
    .with_context(|| format!("Failed to create program at {}", args.path.display()))?;

    println!("Created Mbed program at {}", program.root().display());
    if args.create_only {
        println!("Run `mbed-project checkout` inside the program to fetch Mbed OS.");
    }
    Ok(())
}
