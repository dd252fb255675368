//! Configuration management for navgen.
//!
//! Parses `navgen.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! # Example
//!
//! ```toml
//! default_locale = "en"
//!
//! [docs]
//! source_dir = "${DOCS_DIR:-docs}"
//! exclude = ["drafts"]
//!
//! [sidebar]
//! collapse_depth = 2
//! use_title_from_heading = true
//!
//! [[locales]]
//! id = "en"
//! labels = { "guide/index" = "Guide" }
//!
//! [[locales]]
//! id = "zh"
//! labels = { "guide/index" = "指南" }
//!
//! [[rewrites]]
//! from = "packages/core"
//! to = "core"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `docs.source_dir` supports `${VAR}` (errors if unset) and
//! `${VAR:-default}`.

mod expand;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override default collapsed state of sidebar groups.
    pub collapsed: Option<bool>,
    /// Override whether the root index appears in the sidebar.
    pub include_root_index: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navgen.toml";

/// Locale id used when no locales are configured.
pub const IMPLICIT_LOCALE: &str = "root";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Sidebar policies.
    pub sidebar: SidebarConfig,
    /// Id of the locale served without a URL prefix.
    default_locale: Option<String>,
    /// Declared locales, in output order.
    locales: Vec<LocaleConfig>,
    /// Logical-path to URL rewrites, first match wins.
    pub rewrites: Vec<RewriteConfig>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved locales (set after loading).
    #[serde(skip)]
    pub locales_resolved: Vec<ResolvedLocale>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    #[allow(clippy::derivable_impls)]
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    index_name: Option<String>,
    extensions: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    /// Directory all locale roots are relative to.
    pub source_dir: PathBuf,
    /// Name (without extension) of directory index documents.
    pub index_name: String,
    /// File extensions treated as documents.
    pub extensions: Vec<String>,
    /// Glob patterns of entries to skip, relative to each locale root.
    pub exclude: Vec<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            index_name: "index".to_owned(),
            extensions: vec!["md".to_owned()],
            exclude: Vec::new(),
        }
    }
}

/// Sidebar configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct SidebarConfig {
    /// Groups start collapsed.
    pub collapsed: bool,
    /// Groups at this depth or deeper start collapsed (top level is 1).
    pub collapse_depth: Option<usize>,
    /// Capitalize the first letter of path-derived titles.
    pub capitalize_first: bool,
    /// Replace `-` with a space in path-derived titles.
    pub hyphen_to_space: bool,
    /// Replace `_` with a space in path-derived titles.
    pub underscore_to_space: bool,
    /// Use frontmatter `title`.
    pub use_title_from_frontmatter: bool,
    /// Fall back to the first `# Heading`.
    pub use_title_from_heading: bool,
    /// Sort siblings by frontmatter `order`.
    pub sort_menus_by_frontmatter_order: bool,
    /// Keep the root index as a sidebar entry.
    pub include_root_index: bool,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            collapsed: false,
            collapse_depth: None,
            capitalize_first: true,
            hyphen_to_space: false,
            underscore_to_space: false,
            use_title_from_frontmatter: true,
            use_title_from_heading: false,
            sort_menus_by_frontmatter_order: true,
            include_root_index: false,
        }
    }
}

/// Locale as declared in TOML.
#[derive(Debug, Deserialize)]
struct LocaleConfig {
    id: String,
    root: Option<String>,
    prefix: Option<String>,
    #[serde(default)]
    labels: BTreeMap<String, String>,
}

/// Rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RewriteConfig {
    /// Logical path prefix.
    pub from: String,
    /// URL path prefix.
    pub to: String,
}

/// Locale with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale {
    /// Locale id.
    pub id: String,
    /// Served without a URL prefix.
    pub is_default: bool,
    /// URL prefix (empty for the default locale).
    pub prefix: String,
    /// Content root relative to `docs.source_dir`.
    pub root: PathBuf,
    /// Top navigation labels keyed by logical path.
    pub labels: BTreeMap<String, String>,
}

impl ResolvedLocale {
    fn implicit() -> Self {
        Self {
            id: IMPLICIT_LOCALE.to_owned(),
            is_default: true,
            prefix: String::new(),
            root: PathBuf::new(),
            labels: BTreeMap::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navgen.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or parsing,
    /// expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Absolute content root of a resolved locale.
    #[must_use]
    pub fn locale_root(&self, locale: &ResolvedLocale) -> PathBuf {
        if locale.root.as_os_str().is_empty() {
            return self.docs_resolved.source_dir.clone();
        }
        self.docs_resolved.source_dir.join(&locale.root)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(collapsed) = settings.collapsed {
            self.sidebar.collapsed = collapsed;
        }
        if let Some(include_root_index) = settings.include_root_index {
            self.sidebar.include_root_index = include_root_index;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            sidebar: SidebarConfig::default(),
            default_locale: None,
            locales: Vec::new(),
            rewrites: Vec::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                ..DocsConfig::default()
            },
            locales_resolved: vec![ResolvedLocale::implicit()],
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_sidebar()?;
        self.validate_rewrites()?;
        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.docs_resolved.index_name, "docs.index_name")?;
        if self.docs_resolved.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "docs.extensions cannot be empty".to_owned(),
            ));
        }
        for ext in &self.docs_resolved.extensions {
            require_non_empty(ext, "docs.extensions")?;
            if ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "docs.extensions entry '{ext}' must not start with '.'"
                )));
            }
        }
        Ok(())
    }

    fn validate_sidebar(&self) -> Result<(), ConfigError> {
        if self.sidebar.collapse_depth == Some(0) {
            return Err(ConfigError::Validation(
                "sidebar.collapse_depth must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_rewrites(&self) -> Result<(), ConfigError> {
        for rewrite in &self.rewrites {
            for (value, field) in [(&rewrite.from, "rewrites.from"), (&rewrite.to, "rewrites.to")] {
                if value.starts_with('/') || value.ends_with('/') {
                    return Err(ConfigError::Validation(format!(
                        "{field} '{value}' must not start or end with '/'"
                    )));
                }
            }
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref source_dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }
        Ok(())
    }

    /// Resolve paths against the config directory and apply locale defaults.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let defaults = DocsConfig::default();
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
            index_name: self.docs.index_name.clone().unwrap_or(defaults.index_name),
            extensions: self.docs.extensions.clone().unwrap_or(defaults.extensions),
            exclude: self.docs.exclude.clone().unwrap_or_default(),
        };
        self.locales_resolved = self.resolve_locales()?;
        Ok(())
    }

    fn resolve_locales(&self) -> Result<Vec<ResolvedLocale>, ConfigError> {
        if self.locales.is_empty() {
            if let Some(id) = &self.default_locale {
                return Err(ConfigError::Validation(format!(
                    "default_locale '{id}' is not a configured locale"
                )));
            }
            return Ok(vec![ResolvedLocale::implicit()]);
        }

        let mut seen = HashSet::new();
        for locale in &self.locales {
            require_non_empty(&locale.id, "locales.id")?;
            if !seen.insert(locale.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "locale '{}' is declared more than once",
                    locale.id
                )));
            }
        }

        let default_id = match (&self.default_locale, self.locales.as_slice()) {
            (Some(id), _) if seen.contains(id.as_str()) => id.as_str(),
            (Some(id), _) => {
                return Err(ConfigError::Validation(format!(
                    "default_locale '{id}' is not a configured locale"
                )));
            }
            (None, [only]) => only.id.as_str(),
            (None, _) => {
                return Err(ConfigError::Validation(
                    "default_locale is required when more than one locale is configured"
                        .to_owned(),
                ));
            }
        };

        Ok(self
            .locales
            .iter()
            .map(|locale| {
                let is_default = locale.id == default_id;
                let (prefix, root) = if is_default {
                    (String::new(), locale.root.clone().unwrap_or_default())
                } else {
                    (
                        locale.prefix.clone().unwrap_or_else(|| locale.id.clone()),
                        locale.root.clone().unwrap_or_else(|| locale.id.clone()),
                    )
                };
                ResolvedLocale {
                    id: locale.id.clone(),
                    is_default,
                    prefix,
                    root: PathBuf::from(root),
                    labels: locale.labels.clone(),
                }
            })
            .collect())
    }
}
