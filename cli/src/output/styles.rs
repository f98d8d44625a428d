//! Palette and status markers.

use owo_colors::Style;

use crate::domain::health::Severity;

/// Styles for every kind of text the CLI prints. `Default` is the plain
/// palette: every style is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct Styles {
    pub ok: Style,
    pub warn: Style,
    pub fail: Style,
    pub note: Style,
    pub muted: Style,
    pub strong: Style,
    pub title: Style,
    /// The profile whose email is the global identity.
    pub current: Style,
}

impl Styles {
    #[must_use]
    pub fn colored() -> Self {
        Self {
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
            note: Style::new().blue(),
            muted: Style::new().dimmed(),
            strong: Style::new().bold(),
            title: Style::new().bold().cyan(),
            current: Style::new().bold().green(),
        }
    }

    #[must_use]
    pub fn severity(&self, severity: Severity) -> Style {
        match severity {
            Severity::Ok => self.ok,
            Severity::Warn => self.warn,
            Severity::Fail => self.fail,
        }
    }
}

/// Leading glyph for a status line.
#[must_use]
pub fn marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Ok => "✓",
        Severity::Warn => "⚠",
        Severity::Fail => "✗",
    }
}
