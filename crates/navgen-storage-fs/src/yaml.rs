//! YAML frontmatter extraction.
//!
//! Documents carry their frontmatter as a `---`-fenced YAML mapping at the
//! very top of the file. Values are converted to JSON values so the rest of
//! the engine works with one value type.

use std::collections::BTreeMap;

use navgen_storage::{Frontmatter, FrontmatterError, FrontmatterExtractor, split_frontmatter};

/// Extracts `---`-fenced YAML frontmatter.
///
/// Uses `serde_yaml` for correct handling of all YAML value styles
/// (quoted strings, block scalars `|`/`>`, etc.).
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlFrontmatter;

impl FrontmatterExtractor for YamlFrontmatter {
    fn extract(&self, content: &[u8]) -> Result<Frontmatter, FrontmatterError> {
        let text = std::str::from_utf8(content)
            .map_err(|e| FrontmatterError::Parse(format!("Invalid UTF-8: {e}")))?;

        let Some(block) = split_frontmatter(text)?.0 else {
            return Ok(Frontmatter::default());
        };

        parse_block(block)
    }
}

/// Parse the YAML inside a frontmatter fence.
///
/// Empty blocks and `null` produce an empty mapping.
fn parse_block(block: &str) -> Result<Frontmatter, FrontmatterError> {
    let trimmed = block.trim();
    if trimmed.is_empty() {
        return Ok(Frontmatter::default());
    }

    let values: Option<BTreeMap<String, serde_json::Value>> = serde_yaml::from_str(trimmed)
        .map_err(|e| FrontmatterError::Parse(format!("Invalid YAML: {e}")))?;

    Ok(values.unwrap_or_default().into_iter().collect())
}
