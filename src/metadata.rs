//! # Program Metadata
//!
//! Describes the files that mark a directory as an Mbed program, and the
//! platform (Mbed OS) installation the program builds against.
//!
//! A program root holds:
//! - `mbed-os.lib`, the reference to the platform repository (required);
//! - `.mbed`, the root marker used when searching upward for a program;
//! - `mbed_app.json`, the application configuration (optional).

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::defaults::{
    targets_json_relative_path, APP_CONFIG_FILE_NAME, DEFAULT_MBED_OS_URL,
    MBED_OS_REFERENCE_FILE_NAME, PROGRAM_ROOT_FILE_NAME,
};
use crate::error::{Error, Result};

/// Paths to the metadata files of a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramMetadata {
    /// The program's root directory.
    pub root: PathBuf,
    /// `mbed_app.json`, or `None` if the program sets no custom config.
    pub config_file: Option<PathBuf>,
    /// The `.mbed` root marker.
    pub mbed_file: PathBuf,
    /// `mbed-os.lib`, the platform reference file.
    pub mbed_os_ref: PathBuf,
}

impl ProgramMetadata {
    /// Writes the metadata files for a new program into `root`.
    ///
    /// `root` must already exist. The platform reference points at the default
    /// Mbed OS repository with no pinned revision.
    pub fn from_new(root: &Path) -> Result<Self> {
        let mbed_file = root.join(PROGRAM_ROOT_FILE_NAME);
        if mbed_file.exists() {
            return Err(Error::ExistingProgram {
                path: root.to_path_buf(),
            });
        }

        let config_file = root.join(APP_CONFIG_FILE_NAME);
        let mbed_os_ref = root.join(MBED_OS_REFERENCE_FILE_NAME);

        fs::write(&mbed_file, "")?;
        fs::write(&config_file, "")?;
        fs::write(&mbed_os_ref, format!("{}\n", DEFAULT_MBED_OS_URL))?;

        Ok(Self {
            root: root.to_path_buf(),
            config_file: Some(config_file),
            mbed_file,
            mbed_os_ref,
        })
    }

    /// Loads the metadata of the program at `root`.
    ///
    /// Fails with [`Error::ProgramNotFound`] if `root` has no `mbed-os.lib`.
    /// A missing `.mbed` marker is created.
    pub fn from_existing(root: &Path) -> Result<Self> {
        let mbed_os_ref = root.join(MBED_OS_REFERENCE_FILE_NAME);
        if !mbed_os_ref.is_file() {
            return Err(Error::ProgramNotFound {
                message: format!(
                    "No valid Mbed program found at {}: {} is missing.",
                    root.display(),
                    MBED_OS_REFERENCE_FILE_NAME
                ),
                hint: None,
            });
        }

        let config_file = Some(root.join(APP_CONFIG_FILE_NAME)).filter(|p| p.exists());
        if config_file.is_none() {
            info!("This program does not contain an mbed_app.json config file.");
        }

        let mbed_file = root.join(PROGRAM_ROOT_FILE_NAME);
        if !mbed_file.exists() {
            info!("Creating root marker file {}", mbed_file.display());
            fs::write(&mbed_file, "")?;
        }

        Ok(Self {
            root: root.to_path_buf(),
            config_file,
            mbed_file,
            mbed_os_ref,
        })
    }
}

/// A copy of Mbed OS used by a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInstallation {
    /// Root directory of the installation.
    pub root: PathBuf,
    /// `targets/targets.json`; its presence marks the installation as valid.
    pub targets_json_file: PathBuf,
}

impl PlatformInstallation {
    /// Loads an installation that must already be present at `root`.
    pub fn from_existing(root: &Path) -> Result<Self> {
        let platform = Self::from_new(root);
        if !platform.targets_json_file.is_file() {
            return Err(Error::MissingPlatform {
                path: root.to_path_buf(),
            });
        }
        Ok(platform)
    }

    /// Records where an installation will live, without checking for it.
    ///
    /// Used before the platform has been fetched.
    pub fn from_new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            targets_json_file: root.join(targets_json_relative_path()),
        }
    }

    /// Returns `true` if the installation's metadata file is present.
    pub fn exists(&self) -> bool {
        self.targets_json_file.is_file()
    }
}
