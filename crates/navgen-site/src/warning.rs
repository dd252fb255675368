//! Non-fatal problems recorded while scanning and building.
//!
//! Per-entry and per-document failures never abort a build. They are
//! collected as [`Warning`]s and handed back next to the best-effort result.

use navgen_storage::{FrontmatterError, StorageError};

/// What went wrong.
#[derive(Debug, thiserror::Error)]
pub enum WarningKind {
    /// A directory or file could not be read; the entry was skipped.
    #[error("Scan I/O error: {0}")]
    ScanIo(#[source] StorageError),
    /// Frontmatter was malformed; the document was kept with a derived title.
    #[error("Frontmatter parse error: {0}")]
    Parse(#[source] FrontmatterError),
    /// `order` was not a number; the document was treated as unordered.
    #[error("Malformed order: {0}")]
    MalformedOrder(#[source] FrontmatterError),
}

/// A recorded non-fatal problem.
#[derive(Debug, thiserror::Error)]
#[error("[{locale}] {path}: {kind}")]
pub struct Warning {
    /// Locale being scanned.
    pub locale: String,
    /// Entry path relative to the locale root (`""` for the root itself).
    pub path: String,
    /// What went wrong.
    #[source]
    pub kind: WarningKind,
}

impl Warning {
    /// Create a warning.
    #[must_use]
    pub fn new(locale: impl Into<String>, path: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            locale: locale.into(),
            path: path.into(),
            kind,
        }
    }

    /// True for I/O warnings.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self.kind, WarningKind::ScanIo(_))
    }
}

#[cfg(test)]
mod tests {
    use navgen_storage::StorageErrorKind;

    use super::*;

    #[test]
    fn test_warning_display() {
        let warning = Warning::new(
            "zh",
            "guide/setup.md",
            WarningKind::Parse(FrontmatterError::Parse("bad".to_owned())),
        );

        assert_eq!(
            warning.to_string(),
            "[zh] guide/setup.md: Frontmatter parse error: Invalid frontmatter: bad"
        );
        assert!(!warning.is_io());
    }

    #[test]
    fn test_warning_io() {
        let warning = Warning::new(
            "en",
            "broken.md",
            WarningKind::ScanIo(StorageError::new(StorageErrorKind::PermissionDenied)),
        );

        assert!(warning.is_io());
        assert_eq!(
            warning.to_string(),
            "[en] broken.md: Scan I/O error: Permission denied"
        );
    }

    #[test]
    fn test_warning_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Warning>();
    }
}
