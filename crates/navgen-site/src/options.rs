//! Engine options.
//!
//! [`SiteOptions`] is the immutable policy object handed to the assembler.
//! Every flag toggles one scanning or sidebar policy; nothing is read from
//! ambient state.

use crate::locale::LocaleRegistry;
use crate::path::{DEFAULT_INDEX_NAME, PathResolver, Rewrite};

/// How document and group titles are resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TitleOptions {
    /// Use frontmatter `title` when present.
    pub use_frontmatter: bool,
    /// Fall back to the first `# Heading` of the document.
    pub use_heading: bool,
    /// Capitalize the first letter of path-derived titles.
    pub capitalize_first: bool,
    /// Replace `-` with a space in path-derived titles.
    pub hyphen_to_space: bool,
    /// Replace `_` with a space in path-derived titles.
    pub underscore_to_space: bool,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            use_frontmatter: true,
            use_heading: false,
            capitalize_first: true,
            hyphen_to_space: false,
            underscore_to_space: false,
        }
    }
}

/// Scanning and sidebar policies for one invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteOptions {
    /// Name (without extension) of the document that represents its directory.
    pub index_name: String,
    /// File extensions (without dot) treated as documents.
    pub extensions: Vec<String>,
    /// Glob patterns, relative to a locale root, of entries to skip.
    pub exclude: Vec<String>,
    /// Default collapsed state of groups.
    pub collapsed: bool,
    /// Groups nested at this depth or deeper start collapsed (top level is 1).
    pub collapse_depth: Option<usize>,
    /// Sort siblings by frontmatter `order` before discovery order.
    pub sort_by_frontmatter_order: bool,
    /// Keep the root index document as a top-level sidebar entry.
    pub include_root_index: bool,
    /// Logical-path to URL rewrites.
    pub rewrites: Vec<Rewrite>,
    /// Title resolution.
    pub titles: TitleOptions,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            index_name: DEFAULT_INDEX_NAME.to_owned(),
            extensions: vec!["md".to_owned()],
            exclude: Vec::new(),
            collapsed: false,
            collapse_depth: None,
            sort_by_frontmatter_order: true,
            include_root_index: false,
            rewrites: Vec::new(),
            titles: TitleOptions::default(),
        }
    }
}

impl SiteOptions {
    /// Path resolver configured with these options' rewrites and index name.
    #[must_use]
    pub fn path_resolver<'r>(&self, registry: &'r LocaleRegistry) -> PathResolver<'r> {
        PathResolver::new(registry)
            .with_rewrites(self.rewrites.clone())
            .with_index_name(self.index_name.clone())
    }

    /// Strip a document extension from a file name.
    ///
    /// Returns `None` for files that aren't documents.
    pub(crate) fn document_stem<'n>(&self, file_name: &'n str) -> Option<&'n str> {
        let (stem, ext) = file_name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        self.extensions.iter().any(|e| e == ext).then_some(stem)
    }
}
