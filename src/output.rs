//! # Output Formatting
//!
//! Colour detection and rendering of library listings for the CLI.
//!
//! Colour is controlled by the `--color=auto|always|never` flag. In `auto`
//! mode the usual conventions apply: `NO_COLOR` (https://no-color.org/) and
//! `CLICOLOR=0` turn colour off, `CLICOLOR_FORCE` turns it on even when stdout
//! is not a terminal, and `TERM=dumb` turns it off.

use std::env;
use std::path::Path;

use console::Style;
use serde::Serialize;

use crate::error::Result;
use crate::reference::LibraryReference;

/// Whether to style CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Builds a configuration from the `--color` flag value.
    ///
    /// Unknown values behave like `auto`.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = if color_flag.eq_ignore_ascii_case("always") {
            true
        } else if color_flag.eq_ignore_ascii_case("never") {
            false
        } else {
            colors_wanted_by_env().unwrap_or_else(|| {
                console::Term::stdout().features().colors_supported()
            })
        };
        Self { use_color }
    }

    pub fn plain() -> Self {
        Self { use_color: false }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.use_color {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns `Some` when the environment decides colour on its own.
fn colors_wanted_by_env() -> Option<bool> {
    if env::var_os("NO_COLOR").is_some() {
        return Some(false);
    }
    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return Some(false);
    }
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| !v.is_empty() && v != "0") {
        return Some(true);
    }
    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return Some(false);
    }
    None
}

/// A library as shown by `mbed-project libs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryRecord {
    pub name: String,
    /// Reference file, relative to the program root.
    pub reference_file: String,
    /// Source directory, relative to the program root.
    pub source_code_path: String,
    pub url: String,
    /// Pinned revision, absent when the library tracks the default branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    pub resolved: bool,
}

impl LibraryRecord {
    /// Reads the reference file of `lib` and describes it relative to `root`.
    pub fn from_library(lib: &LibraryReference, root: &Path) -> Result<Self> {
        let reference = lib.get_reference()?;
        let source_code_path = lib
            .source_code_path
            .strip_prefix(root)
            .unwrap_or(&lib.source_code_path);

        Ok(Self {
            name: lib.name(),
            reference_file: display_path(&lib.relative_reference_file(root)),
            source_code_path: display_path(source_code_path),
            revision: Some(reference.revision.clone()).filter(|r| !r.is_empty()),
            url: reference.repo_url,
            resolved: lib.is_resolved(),
        })
    }
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Renders one line per library: status, reference file and URL.
pub fn render_text(records: &[LibraryRecord], config: &OutputConfig) -> String {
    if records.is_empty() {
        return "No libraries found.\n".to_string();
    }

    let width = records
        .iter()
        .map(|r| r.reference_file.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for record in records {
        let status = if record.resolved {
            config.paint("[resolved]  ", Style::new().green())
        } else {
            config.paint("[missing]   ", Style::new().yellow())
        };
        let target = match &record.revision {
            Some(revision) => format!("{}#{}", record.url, config.paint(revision, Style::new().cyan())),
            None => record.url.clone(),
        };
        out.push_str(&format!(
            "{}{:<width$}  {}\n",
            status,
            record.reference_file,
            target,
            width = width
        ));
    }

    let missing = records.iter().filter(|r| !r.resolved).count();
    if missing > 0 {
        out.push_str(&format!(
            "\n{} of {} libraries not fetched yet. Run `mbed-project checkout` to fetch them.\n",
            missing,
            records.len()
        ));
    }
    out
}

/// Renders the records as a pretty-printed JSON array.
pub fn render_json(records: &[LibraryRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
