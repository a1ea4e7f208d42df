//! Helpers shared by several commands.

use std::io::{self, IsTerminal, Write};

use lupe_core::ProgressReporter;

/// Draws a percentage on stderr while a long scan runs.
///
/// Draws nothing unless stderr is a terminal, so piped and captured output stays clean.
pub struct StderrProgress {
    /// Label printed before the percentage.
    label: &'static str,
    /// Whether to draw.
    enabled: bool,
}

impl StderrProgress {
    /// Creates a reporter labelled `label`.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            enabled: io::stderr().is_terminal(),
        }
    }
}

impl ProgressReporter for StderrProgress {
    fn on_progress(&mut self, percent: u8) {
        if !self.enabled {
            return;
        }
        let mut stderr = io::stderr().lock();
        let drawn = if percent >= 100 {
            // Clear the line once done.
            write!(stderr, "\r\x1b[2K")
        } else {
            write!(stderr, "\r{} {percent:>3}%", self.label)
        };
        if drawn.and_then(|()| stderr.flush()).is_err() {
            self.enabled = false;
        }
    }
}
