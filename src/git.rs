//! # Git Backend
//!
//! [`GitClient`] implements [`VersionControl`] on top of the system `git`
//! command, which automatically picks up:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Any authentication configured in ~/.gitconfig
//!
//! The executable defaults to `git` on the `PATH` and can be overridden with
//! the `MBED_PROJECT_GIT` environment variable.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::defaults::GIT_EXECUTABLE_ENV;
use crate::error::{Error, Result};
use crate::progress::{ProgressObserver, ProgressUpdate};
use crate::vcs::{RepositoryHandle, VersionControl};

/// Version control client backed by the `git` command line tool.
#[derive(Debug, Clone)]
pub struct GitClient {
    executable: OsString,
}

impl GitClient {
    /// Creates a client using `$MBED_PROJECT_GIT`, or `git` if unset.
    pub fn new() -> Self {
        let executable =
            std::env::var_os(GIT_EXECUTABLE_ENV).unwrap_or_else(|| OsString::from("git"));
        Self { executable }
    }

    /// Creates a client running the given executable.
    pub fn with_executable(executable: impl AsRef<OsStr>) -> Self {
        Self {
            executable: executable.as_ref().to_os_string(),
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.executable);
        // Keep git from prompting on the terminal while a progress bar is drawn.
        command.env("GIT_TERMINAL_PROMPT", "0");
        command
    }

    fn run_in(&self, dir: &Path, args: &[&OsStr]) -> std::io::Result<Output> {
        debug!("Running git {:?} in {}", args, dir.display());
        self.command()
            .arg("-C")
            .arg(dir)
            .args(args)
            .stdin(Stdio::null())
            .output()
    }

    /// Resolves `revision` to a full commit hash.
    ///
    /// Branches that only exist on the remote are looked up under `origin/`.
    fn resolve_commit(&self, dir: &Path, revision: &str) -> Result<String> {
        // Revisions come from reference files in fetched repositories and
        // must never reach git as an option.
        if revision.starts_with('-') {
            return Err(Error::VersionControl {
                message: format!(
                    "Invalid revision '{}' for repository '{}'.",
                    revision,
                    dir.display()
                ),
                stderr: String::new(),
            });
        }

        let candidates = [
            format!("{}^{{commit}}", revision),
            format!("origin/{}^{{commit}}", revision),
        ];

        let mut last_stderr = String::new();
        for candidate in &candidates {
            let output = self
                .run_in(
                    dir,
                    &[
                        OsStr::new("rev-parse"),
                        OsStr::new("--verify"),
                        OsStr::new(candidate),
                    ],
                )
                .map_err(|e| Error::VersionControl {
                    message: format!("Failed to resolve revision '{}'.", revision),
                    stderr: e.to_string(),
                })?;

            if output.status.success() {
                return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
            }
            last_stderr = String::from_utf8_lossy(&output.stderr).to_string();
        }

        Err(Error::VersionControl {
            message: format!(
                "Failed to resolve revision '{}' in repository '{}'.",
                revision,
                dir.display()
            ),
            stderr: last_stderr,
        })
    }
}

impl Default for GitClient {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitClient {
    fn clone_repo(
        &self,
        url: &str,
        dst: &Path,
        progress: &dyn ProgressObserver,
    ) -> Result<RepositoryHandle> {
        let failed = |stderr: String| Error::VersionControl {
            message: format!("Cloning git repository from url '{}' failed.", url),
            stderr,
        };

        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }

        debug!("Running git clone --progress -- {} {}", url, dst.display());
        let mut child = self
            .command()
            .args(clone_args(url, dst))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(e.to_string()))?;

        progress.started(url);
        let stderr = match child.stderr.take() {
            Some(pipe) => relay_progress(pipe, progress),
            None => String::new(),
        };
        progress.finished();

        let status = child.wait().map_err(|e| failed(e.to_string()))?;
        if !status.success() {
            return Err(failed(stderr));
        }

        Ok(RepositoryHandle::new(dst))
    }

    fn checkout(&self, repo: &RepositoryHandle, revision: &str, force: bool) -> Result<()> {
        let commit = self.resolve_commit(repo.path(), revision)?;

        let mut args = vec![OsStr::new("checkout")];
        if force {
            args.push(OsStr::new("--force"));
        }
        args.push(OsStr::new(&commit));

        let failed = |stderr: String| Error::VersionControl {
            message: format!("Failed to check out revision '{}' ({}).", revision, commit),
            stderr,
        };

        let output = self
            .run_in(repo.path(), &args)
            .map_err(|e| failed(e.to_string()))?;
        if !output.status.success() {
            return Err(failed(String::from_utf8_lossy(&output.stderr).to_string()));
        }
        Ok(())
    }

    fn init(&self, path: &Path) -> Result<RepositoryHandle> {
        let failed = |stderr: String| Error::VersionControl {
            message: format!(
                "Failed to initialise git repository at path '{}'.",
                path.display()
            ),
            stderr,
        };

        let output = self
            .command()
            .arg("init")
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| failed(e.to_string()))?;
        if !output.status.success() {
            return Err(failed(String::from_utf8_lossy(&output.stderr).to_string()));
        }
        Ok(RepositoryHandle::new(path))
    }

    fn open(&self, path: &Path) -> Result<RepositoryHandle> {
        let failed = |stderr: String| Error::VersionControl {
            message: format!("No git repository found at path '{}'.", path.display()),
            stderr,
        };

        let output = self
            .run_in(
                path,
                &[OsStr::new("rev-parse"), OsStr::new("--is-inside-work-tree")],
            )
            .map_err(|e| failed(e.to_string()))?;
        if !output.status.success() || String::from_utf8_lossy(&output.stdout).trim() != "true" {
            return Err(failed(String::from_utf8_lossy(&output.stderr).to_string()));
        }
        Ok(RepositoryHandle::new(path))
    }
}

/// Arguments for `git clone`. The `--` keeps a URL read from a reference
/// file from being parsed as an option.
fn clone_args(url: &str, dst: &Path) -> Vec<OsString> {
    vec![
        OsString::from("clone"),
        OsString::from("--progress"),
        OsString::from("--"),
        OsString::from(url),
        dst.as_os_str().to_os_string(),
    ]
}

/// Reads git's stderr to the end, forwarding progress lines to `progress`.
///
/// Git redraws progress lines with carriage returns, so both `\r` and `\n`
/// end a line. Returns the final state of every line, suitable for error
/// messages.
fn relay_progress(pipe: impl Read, progress: &dyn ProgressObserver) -> String {
    let mut reader = BufReader::new(pipe);
    let mut transcript = String::new();
    let mut line = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let read = match reader.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        for &byte in &chunk[..read] {
            match byte {
                b'\r' => {
                    emit_progress(&line, progress);
                    line.clear();
                }
                b'\n' => {
                    emit_progress(&line, progress);
                    transcript.push_str(&String::from_utf8_lossy(&line));
                    transcript.push('\n');
                    line.clear();
                }
                _ => line.push(byte),
            }
        }
    }

    if !line.is_empty() {
        emit_progress(&line, progress);
        transcript.push_str(&String::from_utf8_lossy(&line));
    }
    transcript
}

fn emit_progress(line: &[u8], progress: &dyn ProgressObserver) {
    if let Some(update) = parse_progress_line(&String::from_utf8_lossy(line)) {
        progress.update(&update);
    }
}

/// Parses a single line of `git clone --progress` output.
///
/// Recognizes both the percentage form
/// (`Receiving objects:  45% (450/1000), 1.2 MiB | 2.0 MiB/s`) and the plain
/// counter form (`remote: Enumerating objects: 1234, done.`).
pub fn parse_progress_line(line: &str) -> Option<ProgressUpdate> {
    static WITH_TOTAL: OnceLock<Option<Regex>> = OnceLock::new();
    static COUNTER: OnceLock<Option<Regex>> = OnceLock::new();

    let line = line.trim();
    let line = line.strip_prefix("remote:").map(str::trim).unwrap_or(line);

    let with_total = WITH_TOTAL
        .get_or_init(|| Regex::new(r"^([A-Za-z][A-Za-z ]*):\s+\d+% \((\d+)/(\d+)\)").ok())
        .as_ref()?;
    if let Some(caps) = with_total.captures(line) {
        return Some(ProgressUpdate {
            stage: caps[1].to_string(),
            current: caps[2].parse().ok()?,
            total: Some(caps[3].parse().ok()?),
        });
    }

    let counter = COUNTER
        .get_or_init(|| Regex::new(r"^([A-Za-z][A-Za-z ]*):\s+(\d+)(?:,|$)").ok())
        .as_ref()?;
    let caps = counter.captures(line)?;
    Some(ProgressUpdate {
        stage: caps[1].to_string(),
        current: caps[2].parse().ok()?,
        total: None,
    })
}
