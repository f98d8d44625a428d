//! Terminal output: palette, status lines, spinners and the renderer for
//! command results.

pub mod human;
pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::{OwoColorize as _, Style};

use crate::domain::health::Severity;

pub use human::HumanRenderer;
pub use progress::Spinner;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Where and how status lines are written.
///
/// Everything except errors goes to stdout and is dropped under `--quiet`.
/// Colors are only used when stdout is a terminal and `--no-color` (or
/// `NO_COLOR`) is absent.
pub struct OutputContext {
    pub styles: Styles,
    pub quiet: bool,
    terminal: bool,
}

impl OutputContext {
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let terminal = Term::stdout().is_term();
        let styles = if terminal && !no_color {
            Styles::colored()
        } else {
            Styles::default()
        };
        Self {
            styles,
            quiet,
            terminal,
        }
    }

    /// Spinners need a terminal and are pointless under `--quiet`.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.terminal && !self.quiet
    }

    fn line(&self, glyph: &str, style: Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", glyph.style(style));
        }
    }

    pub fn success(&self, msg: &str) {
        self.line(styles::marker(Severity::Ok), self.styles.ok, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.line(styles::marker(Severity::Warn), self.styles.warn, msg);
    }

    pub fn info(&self, msg: &str) {
        self.line("ℹ", self.styles.note, msg);
    }

    pub fn step(&self, msg: &str) {
        self.line("→", self.styles.note, msg);
    }

    /// Written to stderr, even under `--quiet`.
    pub fn error(&self, msg: &str) {
        eprintln!(
            "  {} {msg}",
            styles::marker(Severity::Fail).style(self.styles.fail)
        );
    }

    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("  {}", title.style(self.styles.title));
        }
    }

    /// `key` is padded to a fixed column and dimmed.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {:<12} {value}", key.style(self.styles.muted));
        }
    }
}
