//! Title resolution for documents and directory groups.

use std::sync::LazyLock;

use regex::Regex;

use navgen_storage::split_frontmatter;

use crate::options::TitleOptions;

/// First level-1 ATX heading, with optional closing hashes.
static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^#[ \t]+(.+?)(?:[ \t]+#+)?[ \t]*$").unwrap());

/// Title used for the root index document when nothing else applies.
pub(crate) const ROOT_TITLE: &str = "Home";

/// Extract the first `# Heading` from a document body.
///
/// The frontmatter block is skipped. Returns `None` if the document has no
/// level-1 heading.
pub(crate) fn first_heading(content: &str) -> Option<String> {
    let body = split_frontmatter(content).map_or(content, |(_, body)| body);
    let caps = H1_RE.captures(body)?;
    let title = caps[1].trim();
    (!title.is_empty()).then(|| title.to_owned())
}

/// Turn a path segment into a display title.
///
/// Applies the configured separator replacement, then capitalizes the
/// first character if enabled.
pub(crate) fn title_from_segment(segment: &str, options: &TitleOptions) -> String {
    let mut text = segment.to_owned();
    if options.hyphen_to_space {
        text = text.replace('-', " ");
    }
    if options.underscore_to_space {
        text = text.replace('_', " ");
    }
    if options.capitalize_first {
        text = capitalize_first(&text);
    }
    text
}

/// Derive a title from a logical path.
///
/// Index documents take the name of their directory; the root index is
/// titled [`ROOT_TITLE`].
pub(crate) fn title_from_path(logical_path: &str, is_index: bool, options: &TitleOptions) -> String {
    let mut segments = logical_path.rsplit('/');
    let last = segments.next().unwrap_or_default();
    if !is_index {
        return title_from_segment(last, options);
    }
    match segments.next() {
        Some(dir) => title_from_segment(dir, options),
        None => ROOT_TITLE.to_owned(),
    }
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
