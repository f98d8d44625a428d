//! Spinner shown while waiting on the network.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::health::Severity;
use crate::output::OutputContext;
use crate::output::styles::marker;

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "];

/// An indeterminate spinner that ends as a single status line.
///
/// When the context cannot show progress the bar is hidden and `finish`
/// prints nothing.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    #[must_use]
    pub fn start(out: &OutputContext, msg: &str) -> Self {
        if !out.show_progress() {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
            bar.set_style(style.tick_strings(TICKS));
        }
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.bar.is_hidden()
    }

    /// Replace the spinner with `✓`, `⚠` or `✗` followed by `msg`.
    pub fn finish(self, severity: Severity, msg: &str) {
        if let Ok(style) = ProgressStyle::with_template("  {prefix} {msg}") {
            self.bar.set_style(style);
        }
        self.bar.set_prefix(marker(severity));
        self.bar.finish_with_message(msg.to_string());
    }
}
