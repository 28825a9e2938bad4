//! # Version Control Interface
//!
//! The resolution engine never talks to a version control tool directly.
//! Instead it consumes the [`VersionControl`] trait, which exposes exactly
//! the operations the engine needs: clone, checkout, init and open.
//!
//! The application uses [`crate::git::GitClient`], which runs the system
//! `git` command. Tests substitute recording mocks that create directories
//! and reference files instead of fetching anything.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::progress::ProgressObserver;

/// Handle to a local working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    path: PathBuf,
}

impl RepositoryHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Root directory of the working copy.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Trait for version control operations - allows mocking in tests
pub trait VersionControl {
    /// Clones the repository at `url` into `dst`.
    ///
    /// Progress is reported to `progress` while the transfer runs. Fails with
    /// [`crate::error::Error::VersionControl`] on any transport or command
    /// failure.
    fn clone_repo(
        &self,
        url: &str,
        dst: &Path,
        progress: &dyn ProgressObserver,
    ) -> Result<RepositoryHandle>;

    /// Switches the working copy to `revision`.
    ///
    /// `revision` may be a commit hash, tag or branch name; it is resolved to
    /// a commit before switching. When `force` is false the checkout is
    /// rejected if it would overwrite local changes.
    fn checkout(&self, repo: &RepositoryHandle, revision: &str, force: bool) -> Result<()>;

    /// Initialises a new, empty repository at `path`.
    fn init(&self, path: &Path) -> Result<RepositoryHandle>;

    /// Opens the existing working copy at `path`.
    fn open(&self, path: &Path) -> Result<RepositoryHandle>;
}
