//! Colored terminal output for publish progress and results.

use console::{Style, Term};

/// Width of the banner rule.
const RULE_WIDTH: usize = 50;

/// Terminal output formatter (writes to stderr).
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    banner: Style,
    label: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            banner: Style::new().cyan().bold(),
            label: Style::new().bold(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.green, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&self.yellow, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.red, msg);
    }

    /// Print a banner line (cyan bold).
    pub(crate) fn banner(&self, msg: &str) {
        self.styled(&self.banner, msg);
    }

    /// Print a `label: value` line with the label in bold.
    pub(crate) fn field(&self, label: &str, value: &str) {
        let _ = self
            .term
            .write_line(&format!("{} {value}", self.label.apply_to(format!("{label}:"))));
    }

    /// Print indented bullet items.
    pub(crate) fn bullets<'a>(&self, items: impl IntoIterator<Item = &'a str>) {
        for item in items {
            let _ = self.term.write_line(&format!("  - {item}"));
        }
    }

    /// Print a numbered list starting at 1.
    pub(crate) fn numbered<'a>(&self, items: impl IntoIterator<Item = &'a str>) {
        for (i, item) in items.into_iter().enumerate() {
            let _ = self.term.write_line(&format!("{}. {item}", i + 1));
        }
    }

    /// Print a horizontal rule.
    pub(crate) fn rule(&self) {
        let _ = self.term.write_line(&"=".repeat(RULE_WIDTH));
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
