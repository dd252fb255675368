//! Whole-site navigation assembly.
//!
//! [`SiteConfigAssembler`] scans every registered locale, builds its sidebar
//! and top navigation, and merges the results into a [`NavigationConfig`].
//! Locales are processed in parallel; output order always follows
//! registration order.
//!
//! Configuration problems (no default locale, a locale without a content
//! root, an invalid exclude pattern) abort before any content is read.
//! Everything else degrades into [`Warning`]s attached to the result.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use navgen_storage::{ContentTree, FrontmatterExtractor};
use rayon::prelude::*;

use crate::locale::{Locale, LocaleError, LocaleRegistry};
use crate::navigation::{LocaleNavigation, NavEntry, NavigationConfig};
use crate::options::SiteOptions;
use crate::path::PathResolver;
use crate::scanner::ContentScanner;
use crate::sidebar::SidebarBuilder;
use crate::warning::{Warning, WarningKind};

/// Error returned when navigation cannot be assembled.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    /// Locale registry is incomplete.
    #[error(transparent)]
    Locale(#[from] LocaleError),
    /// A registered locale has no content root.
    #[error("No content root configured for locale '{0}'")]
    MissingRoot(String),
    /// An exclude pattern failed to compile.
    #[error("Invalid exclude pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),
    /// Strict mode rejected a build that produced warnings.
    #[error("Build produced {} warning(s)", .0.len())]
    Warnings(Vec<Warning>),
}

/// Navigation for every locale plus the warnings gathered on the way.
#[derive(Debug)]
pub struct Assembly {
    /// Assembled navigation.
    pub navigation: NavigationConfig,
    /// Non-fatal problems, grouped by locale in registration order.
    pub warnings: Vec<Warning>,
}

impl Assembly {
    /// Reject the result if any warning was recorded.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::Warnings`] carrying every warning.
    pub fn into_strict(self) -> Result<NavigationConfig, AssemblyError> {
        if self.warnings.is_empty() {
            Ok(self.navigation)
        } else {
            Err(AssemblyError::Warnings(self.warnings))
        }
    }
}

/// Slash-separated form of a relative path.
fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Roots of other locales that live strictly inside `root`, relative to it.
fn nested_roots(root: &Path, all_roots: &[&Path]) -> Vec<String> {
    all_roots
        .iter()
        .filter_map(|other| other.strip_prefix(root).ok())
        .filter(|rel| !rel.as_os_str().is_empty())
        .map(to_slash)
        .collect()
}

/// Builds [`NavigationConfig`] for a set of locales.
pub struct SiteConfigAssembler {
    tree: Arc<dyn ContentTree>,
    extractor: Arc<dyn FrontmatterExtractor>,
    options: SiteOptions,
}

impl SiteConfigAssembler {
    /// Create an assembler.
    #[must_use]
    pub fn new(
        tree: Arc<dyn ContentTree>,
        extractor: Arc<dyn FrontmatterExtractor>,
        options: SiteOptions,
    ) -> Self {
        Self {
            tree,
            extractor,
            options,
        }
    }

    /// Options used for every build.
    #[must_use]
    pub fn options(&self) -> &SiteOptions {
        &self.options
    }

    /// Assemble navigation for every locale in `registry`.
    ///
    /// `roots` maps locale ids to their content roots within the tree.
    ///
    /// # Errors
    ///
    /// - [`AssemblyError::Locale`] if no default locale is registered
    /// - [`AssemblyError::MissingRoot`] if a locale has no root
    /// - [`AssemblyError::InvalidPattern`] if an exclude pattern is invalid
    pub fn assemble(
        &self,
        registry: &LocaleRegistry,
        roots: &HashMap<String, PathBuf>,
    ) -> Result<Assembly, AssemblyError> {
        registry.default_locale()?;

        let locale_roots = registry
            .locales()
            .iter()
            .map(|locale| {
                roots
                    .get(locale.id())
                    .map(PathBuf::as_path)
                    .ok_or_else(|| AssemblyError::MissingRoot(locale.id().to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let scanner = ContentScanner::new(&*self.tree, &*self.extractor, &self.options)?;
        let resolver = self.options.path_resolver(registry);
        let builder = SidebarBuilder::new(&resolver, &self.options);

        let results: Vec<(LocaleNavigation, Vec<Warning>)> = registry
            .locales()
            .par_iter()
            .zip(locale_roots.par_iter())
            .map(|(locale, root)| {
                let skip_dirs = nested_roots(root, &locale_roots);
                Self::assemble_locale(&scanner, &builder, &resolver, locale, root, &skip_dirs)
            })
            .collect();

        let mut locales = Vec::with_capacity(results.len());
        let mut warnings = Vec::new();
        for (navigation, locale_warnings) in results {
            locales.push(navigation);
            warnings.extend(locale_warnings);
        }

        tracing::info!(
            locales = locales.len(),
            warnings = warnings.len(),
            "Assembled navigation"
        );

        Ok(Assembly {
            navigation: NavigationConfig::new(locales),
            warnings,
        })
    }

    fn assemble_locale(
        scanner: &ContentScanner<'_>,
        builder: &SidebarBuilder<'_>,
        resolver: &PathResolver<'_>,
        locale: &Locale,
        root: &Path,
        skip_dirs: &[String],
    ) -> (LocaleNavigation, Vec<Warning>) {
        let (documents, warnings) = match scanner.scan(locale, root, skip_dirs) {
            Ok(scan) => (scan.documents, scan.warnings),
            Err(err) => {
                tracing::warn!(
                    locale = locale.id(),
                    root = %root.display(),
                    error = %err,
                    "Content root unreadable"
                );
                let warning = Warning::new(locale.id(), "", WarningKind::ScanIo(err));
                (Vec::new(), vec![warning])
            }
        };

        let top_nav = locale
            .display_labels()
            .iter()
            .map(|(path, label)| NavEntry {
                label: label.clone(),
                url: resolver.to_url(locale, path),
            })
            .collect();

        let navigation = LocaleNavigation {
            locale: locale.id().to_owned(),
            top_nav,
            sidebar: builder.build(locale, &documents),
        };
        (navigation, warnings)
    }
}
