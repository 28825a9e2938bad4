//! # Dependency Resolution Engine
//!
//! Fetches every library a program depends on, including libraries that are
//! only discovered once their parent library has been fetched.
//!
//! ## Algorithm
//!
//! Resolution is a fixpoint over repeated scans of the filesystem:
//!
//! 1.  Scan the tree for unresolved library references.
//! 2.  Clone each one in scan order, checking out its pinned revision if the
//!     reference names one.
//! 3.  Scan again. Freshly cloned libraries may contain reference files of
//!     their own, which only become visible now.
//! 4.  Stop when a scan finds nothing unresolved.
//!
//! The filesystem is the only state. There is no dependency graph held in
//! memory, so nothing can go stale between rounds.
//!
//! ## Failure Handling
//!
//! The first clone or checkout failure aborts the whole resolution. Libraries
//! fetched before the failure stay on disk and count as resolved next time.
//!
//! Two guards stop resolution from looping forever:
//! - a clone that succeeds without creating the library's source directory
//!   fails with [`Error::UnresolvedLibrary`];
//! - more than `max_rounds` rounds fails with [`Error::ResolutionLimit`].

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::defaults::DEFAULT_MAX_RESOLUTION_ROUNDS;
use crate::error::{Error, Result};
use crate::progress::ProgressObserver;
use crate::reference::LibraryReference;
use crate::scan;
use crate::vcs::VersionControl;

/// What a resolution did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolveSummary {
    /// Number of fetch rounds performed. Zero if everything was already resolved.
    pub rounds: usize,
    /// Libraries cloned, in the order they were cloned.
    pub cloned: Vec<LibraryReference>,
}

/// Resolves and synchronizes the libraries of a tree through a
/// [`VersionControl`] client.
pub struct Resolver<'a> {
    vcs: &'a dyn VersionControl,
    progress: &'a dyn ProgressObserver,
    max_rounds: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(vcs: &'a dyn VersionControl, progress: &'a dyn ProgressObserver) -> Self {
        Self {
            vcs,
            progress,
            max_rounds: DEFAULT_MAX_RESOLUTION_ROUNDS,
        }
    }

    /// Sets the maximum number of fetch rounds.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Clones every unresolved library at or below `root` until none remain.
    ///
    /// Reference files beneath any of `ignore_paths` are not considered.
    pub fn resolve(&self, root: &Path, ignore_paths: &[PathBuf]) -> Result<ResolveSummary> {
        let mut summary = ResolveSummary::default();

        loop {
            let pending: Vec<LibraryReference> = scan::unresolved(root, ignore_paths).collect();
            if pending.is_empty() {
                debug!(
                    "All libraries under {} resolved after {} round(s)",
                    root.display(),
                    summary.rounds
                );
                return Ok(summary);
            }

            if summary.rounds >= self.max_rounds {
                return Err(Error::ResolutionLimit {
                    rounds: summary.rounds,
                    remaining: pending.len(),
                });
            }
            summary.rounds += 1;
            debug!(
                "Resolution round {}: {} unresolved librar(y/ies)",
                summary.rounds,
                pending.len()
            );

            for lib in pending {
                // An earlier clone in this round may already have provided it.
                if lib.is_resolved() {
                    continue;
                }
                self.fetch(&lib)?;
                summary.cloned.push(lib);
            }
        }
    }

    /// Checks out every resolved library at the revision pinned in its
    /// reference file, then resolves whatever is still missing.
    ///
    /// Libraries whose reference names no revision are left where they are.
    /// With `force`, local changes in the libraries are overwritten.
    pub fn checkout(
        &self,
        root: &Path,
        ignore_paths: &[PathBuf],
        force: bool,
    ) -> Result<ResolveSummary> {
        let resolved: Vec<LibraryReference> = scan::scan(root, ignore_paths)
            .filter(LibraryReference::is_resolved)
            .collect();

        for lib in resolved {
            // Checking out a parent library can remove a nested reference file.
            if !lib.reference_file.is_file() {
                debug!(
                    "Reference file {} disappeared during checkout, skipping",
                    lib.reference_file.display()
                );
                continue;
            }

            let reference = lib.get_reference()?;
            if !reference.is_pinned() {
                debug!(
                    "Library {} does not pin a revision, leaving it unchanged",
                    lib.name()
                );
                continue;
            }

            info!(
                "Checking out revision {} for library {}.",
                reference.revision, reference.repo_url
            );
            let repo = self.vcs.open(&lib.source_code_path)?;
            self.vcs.checkout(&repo, &reference.revision, force)?;
        }

        self.resolve(root, ignore_paths)
    }

    fn fetch(&self, lib: &LibraryReference) -> Result<()> {
        let reference = lib.get_reference()?;
        info!("Resolving library reference {}.", reference.repo_url);

        let repo = self
            .vcs
            .clone_repo(&reference.repo_url, &lib.source_code_path, self.progress)?;

        if !lib.is_resolved() {
            return Err(Error::UnresolvedLibrary {
                reference_file: lib.reference_file.clone(),
                source_code_path: lib.source_code_path.clone(),
            });
        }

        if reference.is_pinned() {
            info!(
                "Checking out revision {} for library {}.",
                reference.revision, reference.repo_url
            );
            self.vcs.checkout(&repo, &reference.revision, false)?;
        }
        Ok(())
    }
}
