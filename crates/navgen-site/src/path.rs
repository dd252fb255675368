//! Mapping between logical document paths and public URLs.
//!
//! # URL Convention
//!
//! - default locale: `/` + logical path (`guide/setup` -> `/guide/setup`)
//! - other locales: `/` + prefix + `/` + logical path (`/zh/guide/setup`)
//! - a final index segment collapses to a trailing slash (`guide/index` -> `/guide/`)
//!
//! Intermediate segments named like the index are kept as-is. Paths are
//! compared case-sensitively.

use std::borrow::Cow;

use crate::locale::{Locale, LocaleError, LocaleRegistry};

/// Default name of the index document within a directory.
pub const DEFAULT_INDEX_NAME: &str = "index";

/// Error returned when a URL cannot be mapped back to a logical path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    /// URL contains illegal segments or is not site-absolute.
    #[error("Malformed URL '{url}': {reason}")]
    Malformed {
        /// Offending URL.
        url: String,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// Locale lookup failed.
    #[error(transparent)]
    Locale(#[from] LocaleError),
}

/// Segment-prefix rewrite from logical path to URL path.
///
/// `from = "api/v2"`, `to = "api"` publishes `api/v2/users` at `/api/users`.
/// Matching happens on whole segments: `api/v2x` is not rewritten.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rewrite {
    /// Logical path prefix.
    pub from: String,
    /// Replacement URL path prefix.
    pub to: String,
}

impl Rewrite {
    /// Create a rewrite rule.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Replace a segment prefix of `path`, if it matches.
fn replace_prefix(path: &str, from: &str, to: &str) -> Option<String> {
    let rest = if from.is_empty() {
        path
    } else {
        let rest = path.strip_prefix(from)?;
        if rest.is_empty() {
            rest
        } else {
            rest.strip_prefix('/')?
        }
    };

    Some(match (to.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_owned(),
        (false, true) => to.to_owned(),
        (false, false) => format!("{to}/{rest}"),
    })
}

/// Bidirectional mapping between `(locale, logical path)` and site URLs.
pub struct PathResolver<'r> {
    registry: &'r LocaleRegistry,
    rewrites: Vec<Rewrite>,
    index_name: String,
}

impl<'r> PathResolver<'r> {
    /// Create a resolver over a fully populated registry.
    #[must_use]
    pub fn new(registry: &'r LocaleRegistry) -> Self {
        Self {
            registry,
            rewrites: Vec::new(),
            index_name: DEFAULT_INDEX_NAME.to_owned(),
        }
    }

    /// Set rewrite rules. The first matching rule wins.
    #[must_use]
    pub fn with_rewrites(mut self, rewrites: Vec<Rewrite>) -> Self {
        self.rewrites = rewrites;
        self
    }

    /// Set the index document name.
    #[must_use]
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    /// Index document name used for collapsing.
    #[must_use]
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Public URL for a document.
    #[must_use]
    pub fn to_url(&self, locale: &Locale, logical_path: &str) -> String {
        let rewritten = self.rewrite(logical_path);
        let path = self.collapse_index(&rewritten);

        if locale.is_default() {
            format!("/{path}")
        } else {
            format!("/{}/{path}", locale.url_prefix())
        }
    }

    /// Map a URL back to its locale and logical path.
    ///
    /// Query strings and fragments are ignored. A URL ending in `/` (or a
    /// bare locale root) resolves to that directory's index document.
    ///
    /// # Errors
    ///
    /// - [`UrlError::Malformed`] if the URL doesn't start with `/` or contains
    ///   `.`, `..` or empty segments
    /// - [`UrlError::Locale`] if no default locale is registered and the URL
    ///   carries no known prefix
    pub fn from_url(&self, url: &str) -> Result<(&'r Locale, String), UrlError> {
        let malformed = |reason| UrlError::Malformed {
            url: url.to_owned(),
            reason,
        };

        let path = url.split(['?', '#']).next().unwrap_or_default();
        let rest = path
            .strip_prefix('/')
            .ok_or_else(|| malformed("must start with '/'"))?;

        let segments: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };
        let last = segments.len().saturating_sub(1);
        for (i, segment) in segments.iter().enumerate() {
            match *segment {
                "" if i != last => return Err(malformed("empty path segment")),
                "." | ".." => return Err(malformed("relative path segment")),
                _ => {}
            }
        }

        let (locale, remaining) = match segments.split_first() {
            Some((first, tail)) => match self.registry.by_prefix(first) {
                Some(locale) => (locale, tail),
                None => (self.registry.default_locale()?, segments.as_slice()),
            },
            None => (self.registry.default_locale()?, segments.as_slice()),
        };

        let joined = remaining.join("/");
        let url_path = if joined.is_empty() {
            self.index_name.clone()
        } else if joined.ends_with('/') {
            format!("{joined}{}", self.index_name)
        } else {
            joined
        };

        Ok((locale, self.unrewrite(&url_path).into_owned()))
    }

    fn rewrite<'p>(&self, logical_path: &'p str) -> Cow<'p, str> {
        self.rewrites
            .iter()
            .find_map(|r| replace_prefix(logical_path, &r.from, &r.to))
            .map_or(Cow::Borrowed(logical_path), Cow::Owned)
    }

    fn unrewrite<'p>(&self, url_path: &'p str) -> Cow<'p, str> {
        self.rewrites
            .iter()
            .find_map(|r| replace_prefix(url_path, &r.to, &r.from))
            .map_or(Cow::Borrowed(url_path), Cow::Owned)
    }

    /// Collapse a final index segment into a trailing slash.
    ///
    /// `index` -> `""`, `guide/index` -> `guide/`, `index/setup` unchanged.
    fn collapse_index<'p>(&self, path: &'p str) -> &'p str {
        if path == self.index_name {
            return "";
        }
        match path.strip_suffix(self.index_name.as_str()) {
            Some(dir) if dir.ends_with('/') => dir,
            _ => path,
        }
    }
}
