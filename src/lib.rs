//! # Mbed Project Library
//!
//! Creates, clones and synchronises Mbed programs together with the libraries
//! they depend on. It backs the `mbed-project` command-line tool but can be
//! used on its own.
//!
//! ## Quick Example
//!
//! ```
//! use mbed_project::reference::parse_reference;
//!
//! let reference = parse_reference("https://github.com/ARMmbed/mbed-os#mbed-os-6.2.0\n");
//! assert_eq!(reference.repo_url, "https://github.com/ARMmbed/mbed-os");
//! assert_eq!(reference.revision, "mbed-os-6.2.0");
//! assert!(reference.is_pinned());
//! ```
//!
//! ## Core Concepts
//!
//! - **Reference files (`reference`)**: a `<name>.lib` file holds a single
//!   line `<url>[#<revision>]`. The library's source lives in the sibling
//!   directory `<name>/`; when that directory exists the library is resolved.
//! - **Scanning (`scan`)**: walks a program tree for reference files, pruning
//!   ignored directories.
//! - **Resolution (`resolve`)**: clones unresolved libraries round after round
//!   until a scan finds nothing left to fetch.
//! - **Programs (`program`, `metadata`)**: a directory marked by `.mbed`, with
//!   an `mbed-os.lib` pointing at the platform.
//! - **Version control (`vcs`, `git`)**: the engine only sees the
//!   `VersionControl` trait; `GitClient` implements it with the `git` command.
//!
//! The `project` module wraps all of this into one function per user action.

pub mod defaults;
pub mod error;
pub mod git;
pub mod metadata;
pub mod output;
pub mod program;
pub mod progress;
pub mod project;
pub mod reference;
pub mod resolve;
pub mod scan;
pub mod vcs;
