//! Progress indicator for batch recipe runs
//!
//! Uses `linya`; the bar is drawn on stderr so it never mixes with the report
//! on stdout.

use linya::{Bar, Progress};

/// Progress bar over the steps of a plan
pub struct StepProgress {
  progress: Progress,
  bar: Bar,
}

impl StepProgress {
  /// Create a new progress bar for `total` steps
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self { progress, bar }
  }

  /// Increment progress by 1
  pub fn inc(&mut self) {
    self.progress.inc_and_draw(&self.bar, 1);
  }
}
