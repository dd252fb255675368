//! Document discovery by walking a locale's content root.
//!
//! The scanner turns a [`ContentTree`] into a flat, ordered list of
//! [`DocumentDescriptor`]s. Emission order is the default sidebar order:
//! within each directory, documents come first, then subdirectories, each
//! sorted lexicographically, recursing depth-first.
//!
//! Failures on individual entries are recorded as warnings and the walk
//! continues. Only an unreadable locale root fails the scan.

use std::path::Path;

use glob::Pattern;
use navgen_storage::{ContentTree, Entry, Frontmatter, FrontmatterExtractor, StorageError};

use crate::locale::Locale;
use crate::options::SiteOptions;
use crate::title::{first_heading, title_from_path};
use crate::warning::{Warning, WarningKind};

/// One discovered document.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentDescriptor {
    /// Locale-relative path without extension (e.g. "guide/setup").
    pub logical_path: String,
    /// Frontmatter as extracted (empty if extraction failed).
    pub frontmatter: Frontmatter,
    /// Resolved display title.
    pub title: String,
    /// Sort position from frontmatter.
    pub order: Option<f64>,
    /// True if the last path segment is the index name.
    pub is_index: bool,
}

/// Result of scanning one locale root.
#[derive(Debug, Default)]
pub struct Scan {
    /// Documents in discovery order.
    pub documents: Vec<DocumentDescriptor>,
    /// Problems recorded along the way.
    pub warnings: Vec<Warning>,
}

/// Join a relative directory prefix and a name.
fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Per-scan state.
struct Walk<'s> {
    locale: &'s Locale,
    skip_dirs: &'s [String],
    scan: Scan,
}

impl Walk<'_> {
    fn warn(&mut self, path: String, kind: WarningKind) {
        tracing::warn!(locale = self.locale.id(), %path, error = %kind, "Skipping entry");
        self.scan
            .warnings
            .push(Warning::new(self.locale.id(), path, kind));
    }
}

/// Walks content roots and builds document descriptors.
pub struct ContentScanner<'a> {
    tree: &'a dyn ContentTree,
    extractor: &'a dyn FrontmatterExtractor,
    options: &'a SiteOptions,
    exclude: Vec<Pattern>,
}

impl<'a> ContentScanner<'a> {
    /// Create a scanner.
    ///
    /// # Errors
    ///
    /// Returns [`glob::PatternError`] if an exclude pattern is invalid.
    pub fn new(
        tree: &'a dyn ContentTree,
        extractor: &'a dyn FrontmatterExtractor,
        options: &'a SiteOptions,
    ) -> Result<Self, glob::PatternError> {
        let exclude = options
            .exclude
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            tree,
            extractor,
            options,
            exclude,
        })
    }

    /// Scan one locale root.
    ///
    /// `skip_dirs` lists directories, relative to `root`, that belong to
    /// other locales and must not be walked.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the root itself cannot be listed. Any
    /// failure below the root is recorded in [`Scan::warnings`] instead.
    pub fn scan(
        &self,
        locale: &Locale,
        root: &Path,
        skip_dirs: &[String],
    ) -> Result<Scan, StorageError> {
        let entries = self.tree.list_entries(root)?;

        let mut walk = Walk {
            locale,
            skip_dirs,
            scan: Scan::default(),
        };
        self.walk_directory(&mut walk, root, "", entries);

        tracing::debug!(
            locale = locale.id(),
            root = %root.display(),
            documents = walk.scan.documents.len(),
            warnings = walk.scan.warnings.len(),
            "Scanned content root"
        );
        Ok(walk.scan)
    }

    fn walk_directory(&self, walk: &mut Walk<'_>, dir: &Path, prefix: &str, entries: Vec<Entry>) {
        let (mut files, mut dirs): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .filter(|e| !e.is_hidden())
            .partition(|e| !e.is_dir);
        files.sort_by(|a, b| a.name.cmp(&b.name));
        dirs.sort_by(|a, b| a.name.cmp(&b.name));

        for entry in files {
            let Some(stem) = self.options.document_stem(&entry.name) else {
                continue;
            };
            let rel_path = join(prefix, &entry.name);
            if self.is_excluded(&rel_path) {
                tracing::trace!(path = %rel_path, "Excluded document");
                continue;
            }
            let logical_path = join(prefix, stem);
            self.load_document(walk, &dir.join(&entry.name), rel_path, logical_path);
        }

        for entry in dirs {
            let rel_path = join(prefix, &entry.name);
            if self.is_excluded(&rel_path) || walk.skip_dirs.contains(&rel_path) {
                tracing::trace!(path = %rel_path, "Skipped directory");
                continue;
            }
            let path = dir.join(&entry.name);
            match self.tree.list_entries(&path) {
                Ok(children) => self.walk_directory(walk, &path, &rel_path, children),
                Err(err) => walk.warn(rel_path, WarningKind::ScanIo(err)),
            }
        }
    }

    fn load_document(
        &self,
        walk: &mut Walk<'_>,
        path: &Path,
        rel_path: String,
        logical_path: String,
    ) {
        let bytes = match self.tree.read_file(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                walk.warn(rel_path, WarningKind::ScanIo(err));
                return;
            }
        };

        let (frontmatter, parsed) = match self.extractor.extract(&bytes) {
            Ok(frontmatter) => (frontmatter, true),
            Err(err) => {
                walk.warn(rel_path.clone(), WarningKind::Parse(err));
                (Frontmatter::default(), false)
            }
        };

        let order = match frontmatter.order() {
            Ok(order) => order,
            Err(err) => {
                walk.warn(rel_path, WarningKind::MalformedOrder(err));
                None
            }
        };

        let is_index = logical_path.rsplit('/').next() == Some(self.options.index_name.as_str());
        let title = self.resolve_title(&frontmatter, &bytes, parsed, &logical_path, is_index);

        walk.scan.documents.push(DocumentDescriptor {
            logical_path,
            frontmatter,
            title,
            order,
            is_index,
        });
    }

    /// Resolve a title: frontmatter, then first heading, then the path.
    ///
    /// Documents whose frontmatter failed to parse always get the path title.
    fn resolve_title(
        &self,
        frontmatter: &Frontmatter,
        content: &[u8],
        parsed: bool,
        logical_path: &str,
        is_index: bool,
    ) -> String {
        let titles = &self.options.titles;

        if titles.use_frontmatter
            && let Some(title) = frontmatter.title()
        {
            return title.to_owned();
        }
        if titles.use_heading
            && parsed
            && let Some(heading) = first_heading(&String::from_utf8_lossy(content))
        {
            return heading;
        }
        title_from_path(logical_path, is_index, titles)
    }

    fn is_excluded(&self, rel_path: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(rel_path))
    }
}
