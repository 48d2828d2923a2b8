//! Status lines on standard error.

use console::{Style, Term};

/// How a status line is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tone {
    /// Plain text.
    Info,
    /// Green.
    Success,
    /// Yellow.
    Warning,
    /// Red.
    Error,
    /// Dimmed and indented under the previous line.
    Detail,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Info => Style::new(),
            Self::Success => Style::new().green(),
            Self::Warning => Style::new().yellow(),
            Self::Error => Style::new().red(),
            Self::Detail => Style::new().dim(),
        }
    }

    fn render(self, msg: &str) -> String {
        let indent = if self == Self::Detail { "  " } else { "" };
        format!("{indent}{}", self.style().apply_to(msg))
    }
}

/// Writes status lines to the terminal's standard error.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// Write `msg` as one line in `tone`. Write errors are ignored.
    pub(crate) fn line(&self, tone: Tone, msg: &str) {
        let _ = self.term.write_line(&tone.render(msg));
    }
}
