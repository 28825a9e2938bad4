//! # Error Handling
//!
//! This module defines the centralized error type for `mbed-project`. It uses
//! the `thiserror` library to describe every failure the library can report,
//! with messages that are meant to be shown to the user verbatim.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failures. None of them are retried by the
//!   library; they propagate to the caller, which for the CLI means the
//!   message is printed to stderr and the process exits non-zero.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The variants cover:
//!
//! - Version control failures (clone, checkout, init, open).
//! - Attempts to create or clone a program inside an existing program tree.
//! - Missing or invalid programs.
//! - Platform installations that lack their metadata file.
//! - Resolution that cannot make progress.
//! - I/O errors.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for mbed-project operations
#[derive(Error, Debug)]
pub enum Error {
    /// A version control operation failed.
    ///
    /// `stderr` holds the diagnostic text reported by the underlying tool.
    #[error("{message}{}", if stderr.trim().is_empty() { String::new() } else { format!(" Error from VCS: {}", stderr.trim()) })]
    VersionControl { message: String, stderr: String },

    /// A program already exists at, or above, the target path.
    #[error("An existing Mbed program was found in the directory tree {}. It is not possible to nest Mbed programs.", path.display())]
    ExistingProgram { path: PathBuf },

    /// No program was found, or the tree does not hold valid program metadata.
    #[error("{message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ProgramNotFound {
        message: String,
        /// Optional hint for how to locate or repair the program
        hint: Option<String>,
    },

    /// The platform installation is missing its metadata file.
    #[error("This Mbed OS copy at {} does not contain a targets.json file.", path.display())]
    MissingPlatform { path: PathBuf },

    /// A library was fetched without error but its source directory never
    /// appeared on disk.
    #[error(
        "Library reference {} was fetched but its source directory {} does not exist.",
        reference_file.display(),
        source_code_path.display()
    )]
    UnresolvedLibrary {
        reference_file: PathBuf,
        source_code_path: PathBuf,
    },

    /// Resolution kept discovering new references past the round limit.
    #[error("Library resolution did not converge after {rounds} rounds; {remaining} reference(s) still unresolved.")]
    ResolutionLimit { rounds: usize, remaining: usize },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
