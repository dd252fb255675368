//! Supported locales and their registry.
//!
//! A [`Locale`] is one language variant of the site. The default locale is
//! served without a URL prefix; every other locale lives under its own
//! single-segment prefix (`/zh/...`).

use std::collections::{BTreeMap, HashMap};

/// Error returned by locale registration and lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    /// A locale with this identifier is already registered.
    #[error("Duplicate locale: {0}")]
    DuplicateLocale(String),
    /// A second default locale was registered.
    #[error("Duplicate default locale: {id} (default is already {existing})")]
    DuplicateDefault {
        /// Locale that was rejected.
        id: String,
        /// Locale that is already the default.
        existing: String,
    },
    /// URL prefix breaks the prefix rules.
    #[error("Invalid URL prefix for locale {id}: {reason}")]
    InvalidPrefix {
        /// Locale that was rejected.
        id: String,
        /// Which rule was broken.
        reason: String,
    },
    /// No locale with this identifier.
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
    /// No default locale registered.
    #[error("No default locale registered")]
    NoDefaultLocale,
}

impl LocaleError {
    /// True if registration was rejected because the locale clashes with
    /// one already registered (same id or a second default).
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateLocale(_) | Self::DuplicateDefault { .. })
    }
}

/// One supported language variant of the site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    id: String,
    is_default: bool,
    url_prefix: String,
    display_labels: BTreeMap<String, String>,
}

impl Locale {
    /// Create the default locale (served without prefix).
    #[must_use]
    pub fn default_locale(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_default: true,
            url_prefix: String::new(),
            display_labels: BTreeMap::new(),
        }
    }

    /// Create a non-default locale served under `/{prefix}/`.
    #[must_use]
    pub fn new(id: impl Into<String>, url_prefix: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_default: false,
            url_prefix: url_prefix.into(),
            display_labels: BTreeMap::new(),
        }
    }

    /// Add a top navigation label for a logical path.
    #[must_use]
    pub fn with_label(mut self, logical_path: impl Into<String>, label: impl Into<String>) -> Self {
        self.display_labels.insert(logical_path.into(), label.into());
        self
    }

    /// Locale identifier (e.g. a language tag).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// True for the locale served without prefix.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// URL prefix segment, empty for the default locale.
    #[must_use]
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Top navigation labels keyed by logical path.
    #[must_use]
    pub fn display_labels(&self) -> &BTreeMap<String, String> {
        &self.display_labels
    }

    fn validate_prefix(&self) -> Result<(), LocaleError> {
        let invalid = |reason: &str| {
            Err(LocaleError::InvalidPrefix {
                id: self.id.clone(),
                reason: reason.to_owned(),
            })
        };

        if self.is_default {
            if !self.url_prefix.is_empty() {
                return invalid("default locale must not have a prefix");
            }
            return Ok(());
        }
        if self.url_prefix.is_empty() {
            return invalid("prefix cannot be empty");
        }
        if self.url_prefix.contains('/') {
            return invalid("prefix must be a single path segment");
        }
        if self.url_prefix == "." || self.url_prefix == ".." {
            return invalid("prefix cannot be a relative segment");
        }
        Ok(())
    }
}

/// Set of supported locales in registration order.
///
/// Built once at startup and only read afterwards, so it can be shared
/// across worker threads by reference.
#[derive(Debug, Default)]
pub struct LocaleRegistry {
    locales: Vec<Locale>,
    by_id: HashMap<String, usize>,
    by_prefix: HashMap<String, usize>,
    default: Option<usize>,
}

impl LocaleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a locale.
    ///
    /// # Errors
    ///
    /// - [`LocaleError::DuplicateLocale`] if the identifier is taken
    /// - [`LocaleError::DuplicateDefault`] if a default locale already exists
    /// - [`LocaleError::InvalidPrefix`] if the prefix is empty, multi-segment,
    ///   set on the default locale, or already taken
    pub fn register(&mut self, locale: Locale) -> Result<(), LocaleError> {
        if self.by_id.contains_key(locale.id()) {
            return Err(LocaleError::DuplicateLocale(locale.id.clone()));
        }
        if locale.is_default
            && let Some(existing) = self.default
        {
            return Err(LocaleError::DuplicateDefault {
                id: locale.id.clone(),
                existing: self.locales[existing].id.clone(),
            });
        }
        locale.validate_prefix()?;
        if !locale.is_default && self.by_prefix.contains_key(locale.url_prefix()) {
            return Err(LocaleError::InvalidPrefix {
                id: locale.id.clone(),
                reason: format!("prefix '{}' is already in use", locale.url_prefix),
            });
        }

        let idx = self.locales.len();
        self.by_id.insert(locale.id.clone(), idx);
        if locale.is_default {
            self.default = Some(idx);
        } else {
            self.by_prefix.insert(locale.url_prefix.clone(), idx);
        }
        tracing::debug!(locale = %locale.id, prefix = %locale.url_prefix, "Registered locale");
        self.locales.push(locale);
        Ok(())
    }

    /// Look up a locale by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError::UnknownLocale`] if no such locale is registered.
    pub fn resolve(&self, id: &str) -> Result<&Locale, LocaleError> {
        self.by_id
            .get(id)
            .map(|&i| &self.locales[i])
            .ok_or_else(|| LocaleError::UnknownLocale(id.to_owned()))
    }

    /// The default locale.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError::NoDefaultLocale`] if none is registered.
    pub fn default_locale(&self) -> Result<&Locale, LocaleError> {
        self.default
            .map(|i| &self.locales[i])
            .ok_or(LocaleError::NoDefaultLocale)
    }

    /// Non-default locale served under the given prefix.
    #[must_use]
    pub fn by_prefix(&self, prefix: &str) -> Option<&Locale> {
        self.by_prefix.get(prefix).map(|&i| &self.locales[i])
    }

    /// All locales in registration order.
    #[must_use]
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// Number of registered locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Check if no locales are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}
