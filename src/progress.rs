//! Progress reporting infrastructure

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::borrow::Cow;

/// CLI progress report of ongoing operations
///
/// To avoid corrupted terminal output, you should not write anything to stdout
/// or stderr yourself as long as a report is being displayed. Please use logs
/// for debug messages.
#[derive(Clone, Debug, Default)]
pub struct ProgressReport(MultiProgress);
//
impl ProgressReport {
    /// Prepare to report progress on the cli
    pub fn new() -> Self {
        Self::default()
    }

    /// Report that is never displayed
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self(MultiProgress::with_draw_target(
            indicatif::ProgressDrawTarget::hidden(),
        ))
    }

    /// Prepare to report on a new operation
    pub fn add(&self, what: impl Into<Cow<'static, str>>, work: Work) -> ProgressTracker {
        let trailer = match work {
            Work::PercentSteps(_) => "{percent:>2}% (~{eta} left)",
            Work::Bytes(_) => "{decimal_bytes}/{decimal_total_bytes} ({decimal_bytes_per_sec})",
        };
        let bar = ProgressBar::new(work.into())
            .with_prefix(what.into())
            .with_style(
                ProgressStyle::with_template(&format!("{{prefix}} {{wide_bar}} {trailer}"))
                    .expect("all styles above should be valid indicatif styles"),
            );
        ProgressTracker {
            bar: self.0.add(bar),
            report: self.0.clone(),
        }
    }
}

/// Work whose progression that can be tracked
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Work {
    /// Steps to be taken, with a percentage-based display
    PercentSteps(usize),

    /// Bytes to be processed
    Bytes(u64),
}
//
impl From<Work> for u64 {
    fn from(value: Work) -> Self {
        match value {
            Work::PercentSteps(p) => p as u64,
            Work::Bytes(b) => b,
        }
    }
}

/// Mechanism to track progress
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    /// Progress bar for this specific process
    bar: ProgressBar,

    /// Underlying process report
    report: MultiProgress,
}
//
impl ProgressTracker {
    /// Show that a certain amount of progress has been made
    ///
    /// Progress saturates at the announced amount of work, since byte counts
    /// measured on decoded lines can slightly overshoot the file size.
    pub fn make_progress(&self, progress: u64) {
        let max = self.bar.length().unwrap_or(0);
        self.bar
            .set_position(self.bar.position().saturating_add(progress).min(max));
    }

    /// Hide the progress bar once the operation is over
    pub fn finish(&self) {
        self.bar.finish_and_clear();
        self.report.remove(&self.bar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_saturates() {
        let report = ProgressReport::hidden();
        let tracker = report.add("Testing", Work::Bytes(10));
        tracker.make_progress(4);
        assert_eq!(tracker.bar.position(), 4);
        tracker.make_progress(40);
        assert_eq!(tracker.bar.position(), 10);
        tracker.finish();
        assert!(tracker.bar.is_finished());
    }
}
