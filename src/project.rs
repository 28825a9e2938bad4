//! # Project API
//!
//! High-level operations on Mbed programs, one per user-facing action. Each
//! function opens or creates a [`Program`] and drives it to completion.
//!
//! ```no_run
//! use std::path::Path;
//! use mbed_project::git::GitClient;
//! use mbed_project::progress::NoProgress;
//! use mbed_project::project;
//!
//! let libs = project::get_libs(Path::new("my-program"), Box::new(GitClient::new()))?;
//! for lib in libs {
//!     println!("{} resolved={}", lib.name(), lib.is_resolved());
//! }
//! # Ok::<(), mbed_project::error::Error>(())
//! ```

use std::path::Path;

use crate::error::Result;
use crate::program::Program;
use crate::progress::ProgressObserver;
use crate::reference::LibraryReference;
use crate::vcs::VersionControl;

/// Options shared by the operations that resolve libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Maximum number of fetch rounds before giving up.
    pub max_rounds: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_rounds: crate::defaults::DEFAULT_MAX_RESOLUTION_ROUNDS,
        }
    }
}

/// Creates a new program at `path`.
///
/// Unless `create_only` is set, the program's libraries (initially just Mbed
/// OS) are fetched too.
pub fn initialise_project(
    path: &Path,
    create_only: bool,
    vcs: Box<dyn VersionControl>,
    progress: &dyn ProgressObserver,
    options: ResolveOptions,
) -> Result<Program> {
    let program = Program::create_new(path, vcs)?.with_max_rounds(options.max_rounds);
    if !create_only {
        program.resolve_libraries(progress)?;
    }
    Ok(program)
}

/// Clones the program at `url` into `dst`, fetching its libraries when
/// `recursive` is set.
pub fn clone_project(
    url: &str,
    dst: &Path,
    recursive: bool,
    vcs: Box<dyn VersionControl>,
    progress: &dyn ProgressObserver,
    options: ResolveOptions,
) -> Result<Program> {
    let program =
        Program::fetch_from_remote(url, dst, vcs, progress)?.with_max_rounds(options.max_rounds);
    if recursive {
        program.resolve_libraries(progress)?;
    }
    Ok(program)
}

/// Checks out the program containing `path` at `revision`, then brings every
/// library in line with the revisions now pinned.
pub fn checkout_project_revision(
    path: &Path,
    revision: &str,
    force: bool,
    vcs: Box<dyn VersionControl>,
    progress: &dyn ProgressObserver,
    options: ResolveOptions,
) -> Result<Program> {
    let program = Program::open_existing(path, vcs)?.with_max_rounds(options.max_rounds);
    program.checkout_revision(revision, force)?;
    program.checkout_libraries(force, progress)?;
    Ok(program)
}

/// Brings every library of the program containing `path` in line with the
/// revisions its reference files pin, fetching any that are missing. The
/// program repository itself is left alone.
pub fn checkout_project_libraries(
    path: &Path,
    force: bool,
    vcs: Box<dyn VersionControl>,
    progress: &dyn ProgressObserver,
    options: ResolveOptions,
) -> Result<Program> {
    let program = Program::open_existing(path, vcs)?.with_max_rounds(options.max_rounds);
    program.checkout_libraries(force, progress)?;
    Ok(program)
}

/// Lists the libraries of the program containing `path`.
pub fn get_libs(path: &Path, vcs: Box<dyn VersionControl>) -> Result<Vec<LibraryReference>> {
    Ok(Program::open_existing(path, vcs)?.list_known_dependencies())
}
