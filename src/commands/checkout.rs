//! # Checkout Command Implementation
//!
//! Checks out every library at the revision its reference file pins and
//! fetches any library that is still missing. With `--revision`, the program
//! repository itself is first moved to that revision.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use mbed_project::git::GitClient;
use mbed_project::progress::ProgressBarObserver;
use mbed_project::project;

use super::ResolveArgs;

/// Synchronise the libraries of an Mbed program
#[derive(Args, Debug)]
pub struct CheckoutArgs {
    /// A directory inside the program. Defaults to the current directory.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Branch, tag or commit to check out the program at first.
    #[arg(long, value_name = "REV")]
    pub revision: Option<String>,

    /// Overwrite local changes in the program and its libraries.
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub resolve: ResolveArgs,
}

/// Execute the `checkout` command.
pub fn execute(args: CheckoutArgs) -> Result<()> {
    let progress = ProgressBarObserver::new();
    let vcs = Box::new(GitClient::new());
    let options = args.resolve.options();

    let program = match &args.revision {
        Some(revision) => project::checkout_project_revision(
            &args.path,
            revision,
            args.force,
            vcs,
            &progress,
            options,
        )
        .with_context(|| format!("Failed to check out revision '{}'", revision))?,
        None => project::checkout_project_libraries(&args.path, args.force, vcs, &progress, options)
            .context("Failed to synchronise libraries")?,
    };

    match &args.revision {
        Some(revision) => println!("Checked out {} at {}", program.root().display(), revision),
        None => println!("Libraries of {} are up to date", program.root().display()),
    }
    Ok(())
}
