//! Progress reporting for long term-dictionary scans.

/// Receives percent-complete updates during a scan.
pub trait ProgressReporter {
    /// Called with a value in `0..=100`. Values never decrease within one operation.
    fn on_progress(&mut self, percent: u8);
}

/// A no-op progress reporter.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn on_progress(&mut self, _percent: u8) {}
}

impl<F: FnMut(u8)> ProgressReporter for F {
    fn on_progress(&mut self, percent: u8) {
        self(percent);
    }
}

/// Converts a running count of work units into throttled percentage updates.
pub struct ProgressTracker<'a> {
    /// Destination for updates.
    reporter: &'a mut dyn ProgressReporter,
    /// Expected number of work units.
    total: u64,
    /// Work units completed so far.
    done: u64,
    /// Last percentage handed to the reporter.
    last: Option<u8>,
}

impl<'a> ProgressTracker<'a> {
    /// Creates a tracker expecting `total` units of work.
    pub fn new(reporter: &'a mut dyn ProgressReporter, total: u64) -> Self {
        Self {
            reporter,
            total,
            done: 0,
            last: None,
        }
    }

    /// Records `units` more completed units, reporting when the percentage changes.
    pub fn advance(&mut self, units: u64) {
        self.done = self.done.saturating_add(units);
        let percent = if self.total == 0 {
            0
        } else {
            // Totals are hints and may be exceeded; clamp below completion.
            (self.done.saturating_mul(100) / self.total).min(99) as u8
        };
        self.emit(percent);
    }

    /// Reports completion.
    pub fn finish(&mut self) {
        self.emit(100);
    }

    /// Forwards `percent` if it moves the reported value forward.
    fn emit(&mut self, percent: u8) {
        if self.last.is_some_and(|last| last >= percent) {
            return;
        }
        self.last = Some(percent);
        self.reporter.on_progress(percent);
    }
}
