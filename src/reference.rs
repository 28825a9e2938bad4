//! # Library References
//!
//! An Mbed library is an external dependency of a program. The program learns
//! about the dependency through a `.lib` file somewhere in its tree, which we
//! call a library reference file. The file holds a single line of the form
//! `<repository url>[#<revision>]`.
//!
//! By convention the dependency's source code lives next to the reference
//! file, in a directory named after the file with its extension stripped:
//! `drivers/sensor.lib` is resolved once `drivers/sensor/` exists.

use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::defaults::REFERENCE_DELIMITER;
use crate::error::Result;

/// A parsed pointer to a dependency's repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Reference {
    /// URL of the repository, passed to the VCS as-is.
    pub repo_url: String,
    /// Commit hash, tag or branch. Empty means the default branch tip.
    pub revision: String,
}

impl Reference {
    /// Returns `true` if the reference pins a specific revision.
    pub fn is_pinned(&self) -> bool {
        !self.revision.is_empty()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pinned() {
            write!(f, "{}{}{}", self.repo_url, REFERENCE_DELIMITER, self.revision)
        } else {
            f.write_str(&self.repo_url)
        }
    }
}

impl FromStr for Reference {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(parse_reference(s))
    }
}

/// Parses the text of a reference file.
///
/// Surrounding whitespace is trimmed, then the text is split on the first
/// `#`. The URL is not validated; a malformed URL surfaces later as a VCS
/// failure.
pub fn parse_reference(text: &str) -> Reference {
    let text = text.trim();
    match text.split_once(REFERENCE_DELIMITER) {
        Some((url, revision)) => Reference {
            repo_url: url.to_string(),
            revision: revision.to_string(),
        },
        None => Reference {
            repo_url: text.to_string(),
            revision: String::new(),
        },
    }
}

/// One dependency slot in a program tree.
///
/// Values are produced by [`crate::scan::scan`] and describe the filesystem
/// at the moment of the scan. Whether the library is resolved is never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryReference {
    /// Path to the `.lib` reference file.
    pub reference_file: PathBuf,
    /// Where the library's source code lives once fetched.
    pub source_code_path: PathBuf,
}

impl LibraryReference {
    /// Builds a reference from the path of a reference file, deriving the
    /// source code path by stripping the extension.
    pub fn from_reference_file(reference_file: impl Into<PathBuf>) -> Self {
        let reference_file = reference_file.into();
        let source_code_path = reference_file.with_extension("");
        Self {
            reference_file,
            source_code_path,
        }
    }

    /// Determines if the source code for this library is present in the tree.
    pub fn is_resolved(&self) -> bool {
        self.source_code_path.is_dir()
    }

    /// Reads and parses the reference file.
    pub fn get_reference(&self) -> Result<Reference> {
        let text = fs::read_to_string(&self.reference_file)?;
        Ok(parse_reference(&text))
    }

    /// Library name, taken from the reference file's stem.
    pub fn name(&self) -> String {
        self.reference_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The reference file path relative to `root`, or the full path if it
    /// does not lie under `root`.
    pub fn relative_reference_file(&self, root: &Path) -> PathBuf {
        self.reference_file
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| self.reference_file.clone())
    }
}
