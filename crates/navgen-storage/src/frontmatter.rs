//! Typed frontmatter mapping.
//!
//! Frontmatter is the key-value block at the head of a document. The engine
//! keeps the whole mapping but only interprets a few keys, each through an
//! accessor with a documented default:
//!
//! - `title`: page title (default: derived from the path)
//! - `order`: sort position among siblings (default: unordered)
//! - `collapsed`: initial group state, read from index documents (default: global setting)
//! - `groupTitle`: group label, read from index documents (default: the index title)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

const TITLE_KEY: &str = "title";
const ORDER_KEY: &str = "order";
const COLLAPSED_KEY: &str = "collapsed";
const GROUP_TITLE_KEY: &str = "groupTitle";

/// Error type for frontmatter operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontmatterError {
    /// The frontmatter block could not be parsed.
    #[error("Invalid frontmatter: {0}")]
    Parse(String),
    /// A recognized key holds a value of the wrong shape.
    #[error("Invalid value for '{key}': {message}")]
    InvalidField {
        /// Frontmatter key.
        key: String,
        /// What was wrong with the value.
        message: String,
    },
}

/// Frontmatter of a single document.
///
/// Keys are kept sorted so serialized output is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frontmatter {
    values: BTreeMap<String, Value>,
}

impl Frontmatter {
    /// Create an empty frontmatter mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key, returning the updated mapping.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Check if no keys are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate keys and values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Page title. Blank strings count as absent.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.non_blank_str(TITLE_KEY)
    }

    /// Group label override for directory groups. Blank strings count as absent.
    #[must_use]
    pub fn group_title(&self) -> Option<&str> {
        self.non_blank_str(GROUP_TITLE_KEY)
    }

    /// Initial collapsed state override. Non-boolean values count as absent.
    #[must_use]
    pub fn collapsed(&self) -> Option<bool> {
        self.values.get(COLLAPSED_KEY).and_then(Value::as_bool)
    }

    /// Sort position among siblings.
    ///
    /// Accepts numbers and numeric strings (`order: "2"`). `null` and a
    /// missing key both mean unordered.
    ///
    /// # Errors
    ///
    /// Returns [`FrontmatterError::InvalidField`] for any other value, so the
    /// caller can report it and fall back to unordered.
    pub fn order(&self) -> Result<Option<f64>, FrontmatterError> {
        let invalid = |message: String| FrontmatterError::InvalidField {
            key: ORDER_KEY.to_owned(),
            message,
        };

        let parsed = match self.values.get(ORDER_KEY) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(other) => return Err(invalid(format!("expected a number, got {other}"))),
        };

        match parsed {
            Some(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(invalid(format!(
                "expected a finite number, got {}",
                self.values[ORDER_KEY]
            ))),
        }
    }

    fn non_blank_str(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl FromIterator<(String, Value)> for Frontmatter {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Extracts frontmatter from raw document bytes.
pub trait FrontmatterExtractor: Send + Sync {
    /// Parse the frontmatter block of a document.
    ///
    /// Documents without a frontmatter block yield an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`FrontmatterError::Parse`] if the document is malformed.
    fn extract(&self, content: &[u8]) -> Result<Frontmatter, FrontmatterError>;
}

/// Split a document into its frontmatter block and body.
///
/// The block must open with a `---` line at the very start of the document
/// (after an optional BOM) and close with a `---` or `...` line. Documents
/// that don't open with `---` have no block and are returned whole as body.
///
/// # Errors
///
/// Returns [`FrontmatterError::Parse`] if the block is never closed.
pub fn split_frontmatter(content: &str) -> Result<(Option<&str>, &str), FrontmatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some(after_fence) = content.strip_prefix("---") else {
        return Ok((None, content));
    };
    let rest = match after_fence
        .strip_prefix("\r\n")
        .or_else(|| after_fence.strip_prefix('\n'))
    {
        Some(rest) => rest,
        // "---" followed by more text on the same line is not a fence
        None if !after_fence.is_empty() => return Ok((None, content)),
        None => return Err(unterminated()),
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed == "---" || trimmed == "..." {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((Some(block), body));
        }
        offset += line.len();
    }

    Err(unterminated())
}

fn unterminated() -> FrontmatterError {
    FrontmatterError::Parse("unterminated frontmatter block".to_owned())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_frontmatter_default_is_empty() {
        let fm = Frontmatter::default();
        assert!(fm.is_empty());
        assert!(fm.title().is_none());
        assert!(fm.group_title().is_none());
        assert!(fm.collapsed().is_none());
        assert_eq!(fm.order(), Ok(None));
    }

    #[test]
    fn test_title_trims_and_ignores_blank() {
        let fm = Frontmatter::new().with("title", "  Getting Started ");
        assert_eq!(fm.title(), Some("Getting Started"));

        let blank = Frontmatter::new().with("title", "   ");
        assert!(blank.title().is_none());
    }

    #[test]
    fn test_title_ignores_non_string() {
        let fm = Frontmatter::new().with("title", 42);
        assert!(fm.title().is_none());
    }

    #[test]
    fn test_group_title() {
        let fm = Frontmatter::new().with("groupTitle", "Guides");
        assert_eq!(fm.group_title(), Some("Guides"));
    }

    #[test]
    fn test_collapsed() {
        assert_eq!(
            Frontmatter::new().with("collapsed", true).collapsed(),
            Some(true)
        );
        assert_eq!(
            Frontmatter::new().with("collapsed", false).collapsed(),
            Some(false)
        );
        assert!(Frontmatter::new().with("collapsed", "yes").collapsed().is_none());
    }

    #[test]
    fn test_order_number() {
        assert_eq!(Frontmatter::new().with("order", 3).order(), Ok(Some(3.0)));
        assert_eq!(
            Frontmatter::new().with("order", 1.5).order(),
            Ok(Some(1.5))
        );
        assert_eq!(
            Frontmatter::new().with("order", -2).order(),
            Ok(Some(-2.0))
        );
    }

    #[test]
    fn test_order_numeric_string() {
        assert_eq!(
            Frontmatter::new().with("order", " 2 ").order(),
            Ok(Some(2.0))
        );
    }

    #[test]
    fn test_order_null_is_unordered() {
        assert_eq!(
            Frontmatter::new().with("order", Value::Null).order(),
            Ok(None)
        );
    }

    #[test]
    fn test_order_malformed() {
        let err = Frontmatter::new().with("order", "first").order().unwrap_err();
        assert!(matches!(err, FrontmatterError::InvalidField { ref key, .. } if key == "order"));

        assert!(Frontmatter::new().with("order", json!([1])).order().is_err());
        assert!(Frontmatter::new().with("order", true).order().is_err());
        assert!(Frontmatter::new().with("order", "NaN").order().is_err());
    }

    #[test]
    fn test_from_iterator_and_get() {
        let fm: Frontmatter = [
            ("title".to_owned(), json!("Intro")),
            ("tags".to_owned(), json!(["a", "b"])),
        ]
        .into_iter()
        .collect();

        assert_eq!(fm.get("tags"), Some(&json!(["a", "b"])));
        let keys: Vec<_> = fm.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["tags", "title"]);
    }

    #[test]
    fn test_serialize_sorted_keys() {
        let fm = Frontmatter::new().with("title", "Intro").with("order", 1);
        let json = serde_json::to_string(&fm).unwrap();
        assert_eq!(json, r#"{"order":1,"title":"Intro"}"#);
    }

    #[test]
    fn test_split_no_frontmatter() {
        let (block, body) = split_frontmatter("# Title\n\nBody").unwrap();
        assert!(block.is_none());
        assert_eq!(body, "# Title\n\nBody");
    }

    #[test]
    fn test_split_with_frontmatter() {
        let (block, body) = split_frontmatter("---\ntitle: Intro\n---\n# Heading\n").unwrap();
        assert_eq!(block, Some("title: Intro\n"));
        assert_eq!(body, "# Heading\n");
    }

    #[test]
    fn test_split_crlf_and_dots_terminator() {
        let (block, body) = split_frontmatter("---\r\norder: 2\r\n...\r\nBody").unwrap();
        assert_eq!(block, Some("order: 2\r\n"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_empty_block() {
        let (block, body) = split_frontmatter("---\n---\nBody").unwrap();
        assert_eq!(block, Some(""));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_strips_bom() {
        let (block, _) = split_frontmatter("\u{feff}---\ntitle: A\n---\n").unwrap();
        assert_eq!(block, Some("title: A\n"));
    }

    #[test]
    fn test_split_dashes_with_text_is_not_fence() {
        let (block, body) = split_frontmatter("--- not a fence\ntext").unwrap();
        assert!(block.is_none());
        assert_eq!(body, "--- not a fence\ntext");
    }

    #[test]
    fn test_split_unterminated() {
        let err = split_frontmatter("---\ntitle: Intro\n# Heading\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Parse(_)));
        assert!(split_frontmatter("---").is_err());
    }
}
