//! Filesystem backends for the navgen navigation engine.
//!
//! This crate provides:
//!
//! - [`FsContentTree`]: [`ContentTree`](navgen_storage::ContentTree) over the local filesystem
//! - [`YamlFrontmatter`]: [`FrontmatterExtractor`](navgen_storage::FrontmatterExtractor)
//!   for `---`-fenced YAML blocks
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use navgen_storage::{ContentTree, FrontmatterExtractor};
//! use navgen_storage_fs::{FsContentTree, YamlFrontmatter};
//!
//! let tree = FsContentTree::new();
//! let bytes = tree.read_file(Path::new("docs/intro.md"))?;
//! let frontmatter = YamlFrontmatter.extract(&bytes)?;
//! ```

mod yaml;

use std::fs;
use std::io;
use std::path::Path;

use navgen_storage::{ContentTree, Entry, StorageError};

pub use yaml::YamlFrontmatter;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem content tree.
///
/// Paths are used as given: absolute paths work directly, relative paths
/// resolve against the process working directory.
///
/// Symbolic links are reported by their own type and never descended into,
/// so a link back to an ancestor can't make the walk unbounded. A symlinked
/// document is still read through the link.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsContentTree;

impl FsContentTree {
    /// Create a filesystem content tree.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Collect directory entries, skipping the ones that can't be inspected.
fn collect_entries<T>(
    dir: &Path,
    items: impl IntoIterator<Item = io::Result<T>>,
    convert: impl Fn(T) -> io::Result<Entry>,
) -> Vec<Entry> {
    items
        .into_iter()
        .filter_map(|item| match item.and_then(&convert) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                None
            }
        })
        .collect()
}

fn to_entry(entry: &fs::DirEntry) -> io::Result<Entry> {
    let file_type = entry.file_type()?;
    if file_type.is_symlink() {
        tracing::trace!(path = %entry.path().display(), "Not following symlink");
    }
    Ok(Entry {
        name: entry.file_name().to_string_lossy().into_owned(),
        is_dir: file_type.is_dir(),
    })
}

impl ContentTree for FsContentTree {
    fn list_entries(&self, path: &Path) -> Result<Vec<Entry>, StorageError> {
        let read_dir = fs::read_dir(path)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;

        let entries = collect_entries(path, read_dir, |entry| to_entry(&entry));

        tracing::trace!(path = %path.display(), count = entries.len(), "Listed directory");
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        fs::read(path).map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))
    }
}
