//! # Transfer Progress Reporting
//!
//! Cloning a large dependency can take a while, so version control
//! implementations report progress through a [`ProgressObserver`]. The
//! observer is called synchronously on the thread performing the transfer,
//! between chunks of output from the underlying tool. It must not block and
//! has no way to influence resolution.
//!
//! Two observers are provided:
//!
//! - [`NoProgress`] discards all updates. Used by tests and library callers
//!   that do not care.
//! - [`ProgressBarObserver`] renders an `indicatif` progress bar on stderr.
//!   Used by the CLI.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// A single progress report from a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Name of the current stage, e.g. `Receiving objects`.
    pub stage: String,
    /// Items processed so far in this stage.
    pub current: u64,
    /// Total items expected in this stage, if known.
    pub total: Option<u64>,
}

/// Receives progress notifications for a single transfer at a time.
pub trait ProgressObserver {
    /// A new transfer identified by `label` (usually the repository URL) has
    /// started.
    fn started(&self, _label: &str) {}

    /// The transfer made progress.
    fn update(&self, update: &ProgressUpdate);

    /// The current transfer ended, successfully or not.
    fn finished(&self) {}
}

/// Observer that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn update(&self, _update: &ProgressUpdate) {}
}

/// Observer that draws a progress bar on stderr.
///
/// A fresh bar is created for every transfer and cleared when it finishes,
/// so output from consecutive clones does not pile up.
pub struct ProgressBarObserver {
    bar: Mutex<Option<ProgressBar>>,
    enabled: bool,
}

impl ProgressBarObserver {
    /// Creates an observer that draws when stderr is a terminal.
    pub fn new() -> Self {
        Self::with_enabled(console::Term::stderr().features().is_attended())
    }

    /// Creates an observer, forcing drawing on or off.
    pub fn with_enabled(enabled: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            enabled,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{prefix:.bold} {msg:<20} [{bar:30.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }
}

impl Default for ProgressBarObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for ProgressBarObserver {
    fn started(&self, label: &str) {
        let bar = if self.enabled {
            ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr())
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(Self::style());
        bar.set_prefix(label.to_string());

        if let Ok(mut slot) = self.bar.lock() {
            if let Some(previous) = slot.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn update(&self, update: &ProgressUpdate) {
        let Ok(slot) = self.bar.lock() else {
            return;
        };
        if let Some(bar) = slot.as_ref() {
            bar.set_message(update.stage.clone());
            if let Some(total) = update.total {
                bar.set_length(total);
            }
            bar.set_position(update.current);
        }
    }

    fn finished(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(stage: &str, current: u64, total: Option<u64>) -> ProgressUpdate {
        ProgressUpdate {
            stage: stage.to_string(),
            current,
            total,
        }
    }

    #[test]
    fn test_no_progress_accepts_updates() {
        let observer = NoProgress;
        observer.started("https://example.com/repo");
        observer.update(&update("Receiving objects", 1, Some(10)));
        observer.finished();
    }

    #[test]
    fn test_progress_bar_tracks_updates() {
        let observer = ProgressBarObserver::with_enabled(false);
        observer.started("https://example.com/repo");
        observer.update(&update("Receiving objects", 5, Some(10)));

        {
            let slot = observer.bar.lock().unwrap();
            let bar = slot.as_ref().unwrap();
            assert_eq!(bar.position(), 5);
            assert_eq!(bar.length(), Some(10));
            assert_eq!(bar.message(), "Receiving objects");
        }

        observer.finished();
        assert!(observer.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_progress_bar_keeps_length_when_total_unknown() {
        let observer = ProgressBarObserver::with_enabled(false);
        observer.started("repo");
        observer.update(&update("Counting objects", 3, Some(7)));
        observer.update(&update("Counting objects", 4, None));

        let slot = observer.bar.lock().unwrap();
        let bar = slot.as_ref().unwrap();
        assert_eq!(bar.position(), 4);
        assert_eq!(bar.length(), Some(7));
    }

    #[test]
    fn test_update_without_start_is_ignored() {
        let observer = ProgressBarObserver::with_enabled(false);
        observer.update(&update("Receiving objects", 1, Some(2)));
        observer.finished();
        assert!(observer.bar.lock().unwrap().is_none());
    }
}
