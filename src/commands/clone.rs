//! # Clone Command Implementation
//!
//! Clones an Mbed program from a remote repository. With `--recursive`,
//! every library it depends on is fetched as well.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use mbed_project::git::GitClient;
use mbed_project::progress::ProgressBarObserver;
use mbed_project::project;

use super::ResolveArgs;

/// Clone an Mbed program
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// URL of the program repository.
    #[arg(value_name = "URL")]
    pub url: String,

    /// Destination directory. Defaults to the repository name from the URL.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Also fetch the program's libraries.
    #[arg(long)]
    pub recursive: bool,

    #[command(flatten)]
    pub resolve: ResolveArgs,
}

/// Execute the `clone` command.
pub fn execute(args: CloneArgs) -> Result<()> {
    let dst = match args.path {
        Some(path) => path,
        None => default_destination(&args.url).with_context(|| {
            format!(
                "Cannot derive a directory name from '{}'; pass a destination path",
                args.url
            )
        })?,
    };

    let progress = ProgressBarObserver::new();
    let program = project::clone_project(
        &args.url,
        &dst,
        args.recursive,
        Box::new(GitClient::new()),
        &progress,
        args.resolve.options(),
    )
    .with_context(|| format!("Failed to clone program from '{}'", args.url))?;

    println!("Cloned Mbed program into {}", program.root().display());
    Ok(())
}

/// Derives a directory name from the last path segment of `url`, dropping
/// any trailing `.git`.
fn default_destination(url: &str) -> Option<PathBuf> {
    let name = url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()?
        .trim_end_matches(".git");
    if name.is_empty() {
        None
    } else {
        Some(PathBuf::from(name))
    }
}
