//! Shared test utilities for integration and E2E tests.
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = ProgramFixture::new().with_program(MBED_OS_URL);
//! fixture.command().arg("libs").assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git, GitRepo, ProgramFixture, MBED_OS_URL};
}

pub const MBED_OS_URL: &str = "https://github.com/ARMmbed/mbed-os";

/// A temporary directory holding (optionally) an Mbed program.
pub struct ProgramFixture {
    temp_dir: assert_fs::TempDir,
}

impl ProgramFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Writes `.mbed` and an `mbed-os.lib` with the given content.
    pub fn with_program(self, mbed_os_ref: &str) -> Self {
        self.with_file(".mbed", "")
            .with_file("mbed-os.lib", mbed_os_ref)
    }

    /// Makes `mbed-os/` a valid platform installation.
    #[allow(dead_code)]
    pub fn with_platform(self) -> Self {
        self.with_file("mbed-os/targets/targets.json", "{}")
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    #[allow(dead_code)]
    pub fn with_dir(self, path: &str) -> Self {
        self.temp_dir
            .child(path)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// A command for the `mbed-project` binary running in this directory.
    ///
    /// Colour is disabled and git is pointed at a path that does not exist,
    /// so tests that do not mean to reach git fail loudly if they do.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("mbed-project");
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("MBED_PROJECT_LOG")
            .env_remove("MBED_PROJECT_MAX_ROUNDS")
            .env("MBED_PROJECT_GIT", self.path().join("no-such-git"));
        cmd
    }

    /// Like [`ProgramFixture::command`], but with the real `git`.
    #[allow(dead_code)]
    pub fn command_with_git(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.env_remove("MBED_PROJECT_GIT");
        cmd
    }
}

impl Default for ProgramFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `git` in `dir` with a fixed identity, panicking on failure.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.name=Test",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "init.defaultBranch=main",
        ])
        .args(args)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A local git repository that tests can clone from with a `file://` URL.
#[allow(dead_code)]
pub struct GitRepo {
    path: PathBuf,
}

#[allow(dead_code)]
impl GitRepo {
    /// Initialises an empty repository at `path`.
    pub fn init(path: &Path) -> Self {
        std::fs::create_dir_all(path).expect("Failed to create repository directory");
        git(path, &["init", "--quiet"]);
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Writes `files` and commits them, returning the new commit hash.
    pub fn commit(&self, message: &str, files: &[(&str, &str)]) -> String {
        for (name, content) in files {
            let file = self.path.join(name);
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create directory");
            }
            std::fs::write(file, content).expect("Failed to write file");
        }
        git(&self.path, &["add", "--all"]);
        git(&self.path, &["commit", "--quiet", "-m", message]);
        git(&self.path, &["rev-parse", "HEAD"])
    }

    pub fn tag(&self, name: &str) {
        git(&self.path, &["tag", name]);
    }

    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_program() {
        let fixture = ProgramFixture::new().with_program(MBED_OS_URL);
        assert!(fixture.path().join(".mbed").exists());
        assert!(fixture.path().join("mbed-os.lib").exists());
    }
}
