//! Service progress events printed as status lines.

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::domain::health::Severity;
use crate::output::OutputContext;
use crate::output::styles::marker;

/// `ProgressReporter` over an `OutputContext`. Steps and successes honor
/// `--quiet`; warnings go to stderr and always show.
pub struct TerminalReporter<'a> {
    out: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(out: &'a OutputContext) -> Self {
        Self { out }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        self.out.step(message);
    }

    fn success(&self, message: &str) {
        self.out.success(message);
    }

    fn warn(&self, message: &str) {
        let glyph = marker(Severity::Warn);
        let glyph = glyph.style(self.out.styles.warn);
        eprintln!("  {glyph} {message}");
    }
}
