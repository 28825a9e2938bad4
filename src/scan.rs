//! # Library Reference Scanner
//!
//! Finds every library reference file (`*.lib`) in a program tree.
//!
//! The scan is lazy and never cached: every call walks the filesystem again.
//! This matters because resolving a library clones new source trees into the
//! program, and those trees may carry reference files of their own.
//!
//! Directories listed in `ignore_paths` are pruned from the walk, so nothing
//! beneath them is ever reported. The platform installation uses this to hide
//! the reference files in its own test fixtures. `.git` directories are
//! always skipped.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use log::warn;
use walkdir::{DirEntry, WalkDir};

use crate::defaults::LIB_REFERENCE_EXTENSION;
use crate::reference::LibraryReference;

/// Lists every library reference at or below `root`.
///
/// Entries are yielded in a stable depth-first order, with siblings sorted by
/// file name. Unreadable directories are logged and skipped.
pub fn scan(root: &Path, ignore_paths: &[PathBuf]) -> impl Iterator<Item = LibraryReference> {
    let ignore_paths = ignore_paths.to_vec();

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| !is_pruned(entry, &ignore_paths))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping unreadable path while scanning for libraries: {}", err);
                None
            }
        })
        .filter(is_reference_file)
        .map(|entry| LibraryReference::from_reference_file(entry.into_path()))
}

/// Lists the library references at or below `root` whose source code is not
/// present yet.
pub fn unresolved(
    root: &Path,
    ignore_paths: &[PathBuf],
) -> impl Iterator<Item = LibraryReference> {
    scan(root, ignore_paths).filter(|lib| !lib.is_resolved())
}

fn is_pruned(entry: &DirEntry, ignore_paths: &[PathBuf]) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    entry.file_name() == OsStr::new(".git")
        || ignore_paths
            .iter()
            .any(|ignored| entry.path().starts_with(ignored))
}

fn is_reference_file(entry: &DirEntry) -> bool {
    !entry.file_type().is_dir()
        && entry.path().extension() == Some(OsStr::new(LIB_REFERENCE_EXTENSION))
}
