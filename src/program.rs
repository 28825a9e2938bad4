//! # Mbed Program
//!
//! A [`Program`] is a version-controlled directory tree holding
//! [`ProgramMetadata`], a reference to its platform (Mbed OS) and any number
//! of library reference files. It ties the scanner and the resolution engine
//! together into program-level operations.
//!
//! Programs cannot be nested: creating or cloning a program anywhere below an
//! existing program root fails with [`Error::ExistingProgram`].

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::defaults::{DEFAULT_MAX_RESOLUTION_ROUNDS, MBED_OS_DIR_NAME, PROGRAM_ROOT_FILE_NAME};
use crate::error::{Error, Result};
use crate::metadata::{PlatformInstallation, ProgramMetadata};
use crate::progress::ProgressObserver;
use crate::reference::LibraryReference;
use crate::resolve::{ResolveSummary, Resolver};
use crate::scan;
use crate::vcs::VersionControl;

/// An Mbed program on the local filesystem.
pub struct Program {
    pub metadata: ProgramMetadata,
    pub platform: PlatformInstallation,
    vcs: Box<dyn VersionControl>,
    max_rounds: usize,
}

impl Program {
    /// Creates a new program in `dir`, creating the directory if needed.
    ///
    /// Writes the metadata files, pointing `mbed-os.lib` at the default Mbed
    /// OS repository, and initialises a repository. Nothing is written if
    /// `dir` already lies inside a program.
    pub fn create_new(dir: &Path, vcs: Box<dyn VersionControl>) -> Result<Self> {
        if tree_contains_program(dir) {
            return Err(Error::ExistingProgram {
                path: dir.to_path_buf(),
            });
        }

        fs::create_dir_all(dir)?;
        let root = dir.canonicalize()?;
        info!("Creating Mbed program at path {}", root.display());

        let metadata = ProgramMetadata::from_new(&root)?;
        info!("Creating git repository for the Mbed program {}", root.display());
        vcs.init(&root)?;

        Ok(Self {
            platform: PlatformInstallation::from_new(&root.join(MBED_OS_DIR_NAME)),
            metadata,
            vcs,
            max_rounds: DEFAULT_MAX_RESOLUTION_ROUNDS,
        })
    }

    /// Clones the program at `url` into `dst`.
    ///
    /// The clone must hold a valid program at its top level, otherwise this
    /// fails with [`Error::ProgramNotFound`]. Libraries are not resolved.
    pub fn fetch_from_remote(
        url: &str,
        dst: &Path,
        vcs: Box<dyn VersionControl>,
        progress: &dyn ProgressObserver,
    ) -> Result<Self> {
        if tree_contains_program(dst) {
            return Err(Error::ExistingProgram {
                path: dst.to_path_buf(),
            });
        }

        info!("Cloning Mbed program from URL '{}'.", url);
        vcs.clone_repo(url, dst, progress)?;
        let root = dst.canonicalize()?;

        let metadata = ProgramMetadata::from_existing(&root).map_err(|err| match err {
            Error::ProgramNotFound { message, .. } => Error::ProgramNotFound {
                message: format!(
                    "This repository does not contain a valid Mbed program at the top level. {}",
                    message
                ),
                hint: Some(
                    "Cloned programs must contain an mbed-os.lib file containing the URL to the \
                     Mbed OS repository. If the repository holds several programs, cd to one of \
                     them before running other commands."
                        .to_string(),
                ),
            },
            other => other,
        })?;

        Ok(Self {
            platform: PlatformInstallation::from_new(&root.join(MBED_OS_DIR_NAME)),
            metadata,
            vcs,
            max_rounds: DEFAULT_MAX_RESOLUTION_ROUNDS,
        })
    }

    /// Opens the program containing `dir`, searching upward for its root.
    pub fn open_existing(dir: &Path, vcs: Box<dyn VersionControl>) -> Result<Self> {
        let root = find_program_root(dir)?;
        info!("Found existing Mbed program at path '{}'", root.display());

        let metadata = ProgramMetadata::from_existing(&root)?;
        let platform_root = root.join(MBED_OS_DIR_NAME);
        let platform = match PlatformInstallation::from_existing(&platform_root) {
            Ok(platform) => platform,
            Err(Error::MissingPlatform { .. }) => {
                info!(
                    "Mbed OS is not present at {}; it will be fetched when libraries are resolved.",
                    platform_root.display()
                );
                PlatformInstallation::from_new(&platform_root)
            }
            Err(err) => return Err(err),
        };

        Ok(Self {
            metadata,
            platform,
            vcs,
            max_rounds: DEFAULT_MAX_RESOLUTION_ROUNDS,
        })
    }

    /// Sets the maximum number of fetch rounds used when resolving libraries.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// The program's root directory.
    pub fn root(&self) -> &Path {
        &self.metadata.root
    }

    /// Clones every library the program depends on, recursively.
    pub fn resolve_libraries(&self, progress: &dyn ProgressObserver) -> Result<ResolveSummary> {
        info!("Resolving libraries for program {}", self.root().display());
        self.resolver(progress)
            .resolve(self.root(), &self.ignore_paths())
    }

    /// Checks out every library at its pinned revision, then resolves any
    /// libraries that are still missing.
    pub fn checkout_libraries(
        &self,
        force: bool,
        progress: &dyn ProgressObserver,
    ) -> Result<ResolveSummary> {
        info!("Synchronising libraries for program {}", self.root().display());
        self.resolver(progress)
            .checkout(self.root(), &self.ignore_paths(), force)
    }

    /// Checks out the program's own repository at `revision`.
    pub fn checkout_revision(&self, revision: &str, force: bool) -> Result<()> {
        info!("Checking out program revision {}", revision);
        let repo = self.vcs.open(self.root())?;
        self.vcs.checkout(&repo, revision, force)
    }

    /// Lists every library reference in the program, resolved or not.
    pub fn list_known_dependencies(&self) -> Vec<LibraryReference> {
        scan::scan(self.root(), &self.ignore_paths()).collect()
    }

    fn resolver<'a>(&'a self, progress: &'a dyn ProgressObserver) -> Resolver<'a> {
        Resolver::new(self.vcs.as_ref(), progress).with_max_rounds(self.max_rounds)
    }

    /// Mbed OS ships test fixtures containing `.lib` files that are not real
    /// dependencies.
    fn ignore_paths(&self) -> Vec<PathBuf> {
        vec![self.platform.root.clone()]
    }
}

/// Checks if `path` or any of its ancestors contains a `.mbed` file.
pub fn tree_contains_program(path: &Path) -> bool {
    find_program_root(path).is_ok()
}

/// Walks up the directory tree from `start`, looking for a `.mbed` file.
///
/// Returns the absolute path of the first directory containing one. `start`
/// does not need to exist. The filesystem root itself is not considered.
pub fn find_program_root(start: &Path) -> Result<PathBuf> {
    let start = absolute_path(start)?;

    for candidate in start.ancestors() {
        if candidate.parent().is_none() {
            break;
        }
        debug!("Searching for .mbed file at path {}", candidate.display());
        if candidate.join(PROGRAM_ROOT_FILE_NAME).exists() {
            return Ok(candidate.to_path_buf());
        }
    }

    let fs_root = start.ancestors().last().unwrap_or(start.as_path()).to_path_buf();
    Err(Error::ProgramNotFound {
        message: format!(
            "No program found from {} to {}.",
            start.display(),
            fs_root.display()
        ),
        hint: Some("Please set the cwd to a program directory or subdirectory.".to_string()),
    })
}

/// Resolves `path` to an absolute path, following symlinks where the path
/// exists.
fn absolute_path(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(resolved) => Ok(resolved),
        Err(_) => Ok(std::path::absolute(path)?),
    }
}
