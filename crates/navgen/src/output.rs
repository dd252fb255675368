//! Build reporting on stderr.
//!
//! stdout carries generated JSON and resolved paths, so everything meant for
//! a human goes through [`Output`].

use std::collections::BTreeMap;
use std::path::Path;

use console::{Style, Term};
use navgen_site::Warning;

/// Styled stderr reporter for CLI commands.
pub(crate) struct Output {
    term: Term,
    dim: Style,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            dim: Style::new().dim(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    fn line(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }

    /// Report the content directory a build reads from.
    pub(crate) fn source_dir(&self, path: &Path) {
        self.line(&self.dim, &format!("Source directory: {}", path.display()));
    }

    /// Report every warning, then a per-locale tally.
    pub(crate) fn warnings(&self, warnings: &[Warning]) {
        for warning in warnings {
            self.line(&self.yellow, &format!("Warning: {warning}"));
        }
        if let Some(summary) = warning_summary(warnings) {
            self.line(&self.yellow, &summary);
        }
    }

    /// Report a navigation file written to disk.
    pub(crate) fn written(&self, path: &Path, locales: usize) {
        self.line(
            &self.green,
            &format!("Wrote navigation for {locales} locale(s) to {}", path.display()),
        );
    }

    /// Report a command failure.
    pub(crate) fn error(&self, err: &dyn std::error::Error) {
        self.line(&self.red, &format!("Error: {err}"));
    }
}

/// One-line tally such as `3 warning(s): en 1, zh 2`.
fn warning_summary(warnings: &[Warning]) -> Option<String> {
    if warnings.is_empty() {
        return None;
    }
    let mut per_locale: BTreeMap<&str, usize> = BTreeMap::new();
    for warning in warnings {
        *per_locale.entry(warning.locale.as_str()).or_default() += 1;
    }
    let counts: Vec<String> = per_locale
        .iter()
        .map(|(locale, count)| format!("{locale} {count}"))
        .collect();
    Some(format!("{} warning(s): {}", warnings.len(), counts.join(", ")))
}

#[cfg(test)]
mod tests {
    use navgen_site::WarningKind;
    use navgen_storage::{FrontmatterError, StorageError, StorageErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse_warning(locale: &str, path: &str) -> Warning {
        Warning::new(
            locale,
            path,
            WarningKind::Parse(FrontmatterError::Parse("bad".to_owned())),
        )
    }

    #[test]
    fn test_warning_summary_empty() {
        assert_eq!(warning_summary(&[]), None);
    }

    #[test]
    fn test_warning_summary_groups_by_locale() {
        let warnings = vec![
            parse_warning("zh", "intro.md"),
            parse_warning("en", "guide/setup.md"),
            Warning::new(
                "zh",
                "",
                WarningKind::ScanIo(StorageError::new(StorageErrorKind::PermissionDenied)),
            ),
        ];

        assert_eq!(
            warning_summary(&warnings),
            Some("3 warning(s): en 1, zh 2".to_owned())
        );
    }
}
