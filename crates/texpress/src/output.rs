//! Styled terminal output for the CLI.

use console::{Style, Term};

/// Writes human-facing messages to stderr.
pub(crate) struct Output {
    term: Term,
    dim: Style,
    yellow: Style,
    red: Style,
    title: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            dim: Style::new().dim(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            title: Style::new().cyan().bold(),
        }
    }

    /// Startup banner.
    pub(crate) fn banner(&self, version: &str) {
        self.line(&self.title.apply_to(format!("TExpress {version}")).to_string());
    }

    /// `label: value` line with a dimmed label.
    pub(crate) fn field(&self, label: &str, value: &str) {
        self.line(&format!("{} {value}", self.dim.apply_to(format!("{label}:"))));
    }

    /// A static site and where it is served from. Unknown bundles are flagged.
    pub(crate) fn site(&self, slug: &str, target: &str, bundle_known: bool) {
        let entry = format!("  /{slug}/ -> {target}");
        if bundle_known {
            self.line(&entry);
        } else {
            let warning = format!("{entry} (bundle not listed in [bundles])");
            self.line(&self.yellow.apply_to(warning).to_string());
        }
    }

    /// Error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red.apply_to(msg).to_string());
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}
