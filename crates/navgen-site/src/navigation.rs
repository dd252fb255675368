//! Navigation output consumed by a site renderer.
//!
//! Serializes to camelCase JSON:
//!
//! ```json
//! [
//!   {
//!     "locale": "en",
//!     "topNav": [{ "label": "Guide", "url": "/guide/" }],
//!     "sidebar": [
//!       { "title": "Intro", "url": "/intro" },
//!       { "title": "Guide", "url": "/guide/", "collapsed": false, "children": [] }
//!     ]
//!   }
//! ]
//! ```

use serde::Serialize;

/// Node in a sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SidebarNode {
    /// A single document.
    Leaf {
        /// Display title.
        title: String,
        /// Public URL.
        url: String,
    },
    /// A directory.
    Group {
        /// Display title.
        title: String,
        /// URL of the directory's index document, if it has one.
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        /// Whether the group starts collapsed.
        collapsed: bool,
        /// Child nodes in display order.
        children: Vec<SidebarNode>,
    },
}

impl SidebarNode {
    /// Create a leaf node.
    #[must_use]
    pub fn leaf(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Leaf {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Leaf { title, .. } | Self::Group { title, .. } => title,
        }
    }

    /// Link target, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Leaf { url, .. } => Some(url),
            Self::Group { url, .. } => url.as_deref(),
        }
    }

    /// Children (empty for leaves).
    #[must_use]
    pub fn children(&self) -> &[SidebarNode] {
        match self {
            Self::Leaf { .. } => &[],
            Self::Group { children, .. } => children,
        }
    }

    /// True for groups.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }
}

/// Top navigation link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Display label.
    pub label: String,
    /// Public URL.
    pub url: String,
}

/// Navigation for one locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleNavigation {
    /// Locale id.
    pub locale: String,
    /// Top navigation links.
    pub top_nav: Vec<NavEntry>,
    /// Sidebar tree.
    pub sidebar: Vec<SidebarNode>,
}

/// Navigation for every locale, in registration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NavigationConfig {
    locales: Vec<LocaleNavigation>,
}

impl NavigationConfig {
    /// Create from per-locale navigation.
    #[must_use]
    pub fn new(locales: Vec<LocaleNavigation>) -> Self {
        Self { locales }
    }

    /// All locales in registration order.
    #[must_use]
    pub fn locales(&self) -> &[LocaleNavigation] {
        &self.locales
    }

    /// Navigation for a locale.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&LocaleNavigation> {
        self.locales.iter().find(|n| n.locale == locale)
    }

    /// Sidebar for a locale.
    #[must_use]
    pub fn sidebar(&self, locale: &str) -> Option<&[SidebarNode]> {
        self.get(locale).map(|n| n.sidebar.as_slice())
    }

    /// Top navigation for a locale.
    #[must_use]
    pub fn top_nav(&self, locale: &str) -> Option<&[NavEntry]> {
        self.get(locale).map(|n| n.top_nav.as_slice())
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
