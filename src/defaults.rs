//! Default values and file-layout conventions for Mbed programs.
//!
//! This module centralizes the names of the files that make up a program
//! tree, so every component agrees on where things live on disk.

/// Name of the marker file that defines a program's root directory.
///
/// Its contents are ignored; only its presence matters.
pub const PROGRAM_ROOT_FILE_NAME: &str = ".mbed";

/// Name of the optional application configuration file.
pub const APP_CONFIG_FILE_NAME: &str = "mbed_app.json";

/// Name of the directory the platform (Mbed OS) is fetched into.
pub const MBED_OS_DIR_NAME: &str = "mbed-os";

/// Name of the reference file pointing at the platform repository.
pub const MBED_OS_REFERENCE_FILE_NAME: &str = "mbed-os.lib";

/// Extension (without the dot) of library reference files.
pub const LIB_REFERENCE_EXTENSION: &str = "lib";

/// Delimiter between the repository URL and revision in a reference file.
pub const REFERENCE_DELIMITER: char = '#';

/// URL written into `mbed-os.lib` when a new program is created.
pub const DEFAULT_MBED_OS_URL: &str = "https://github.com/ARMmbed/mbed-os";

/// Upper bound on fetch rounds performed by a single resolution.
///
/// Each round clones every reference that was unresolved at the start of the
/// round. Deep transitive chains need one round per level.
///
/// Can be overridden by the `--max-rounds` CLI flag or the
/// `MBED_PROJECT_MAX_ROUNDS` environment variable.
pub const DEFAULT_MAX_RESOLUTION_ROUNDS: usize = 64;

/// Environment variable naming the `git` executable to run.
pub const GIT_EXECUTABLE_ENV: &str = "MBED_PROJECT_GIT";

/// Returns the relative path, inside a platform installation, of the file
/// whose presence marks the installation as valid.
pub fn targets_json_relative_path() -> std::path::PathBuf {
    ["targets", "targets.json"].iter().collect()
}
