//! Mock content tree for testing.
//!
//! Provides [`MockContentTree`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::storage::{ContentTree, Entry, StorageError, StorageErrorKind};

const BACKEND: &str = "Mock";

/// In-memory content tree for testing.
///
/// Files are stored by path; parent directories are created implicitly.
/// Individual files and directories can be marked unreadable to exercise
/// partial-failure handling.
///
/// # Example
///
/// ```ignore
/// use navgen_storage::{ContentTree, MockContentTree};
///
/// let tree = MockContentTree::new()
///     .with_file("en/intro.md", "---\ntitle: Intro\n---\n")
///     .with_unreadable_file("en/broken.md");
///
/// let entries = tree.list_entries(Path::new("en")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockContentTree {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    unreadable: BTreeSet<PathBuf>,
}

impl MockContentTree {
    /// Create a new empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content, creating its parent directories.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.files.insert(path, content.into());
        self
    }

    /// Add an empty directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.dirs.insert(path);
        self
    }

    /// Add a file that shows up in listings but fails to read.
    #[must_use]
    pub fn with_unreadable_file(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut tree = self.with_file(path.clone(), Vec::new());
        tree.unreadable.insert(path);
        tree
    }

    /// Add a directory that shows up in listings but fails to list.
    #[must_use]
    pub fn with_unreadable_dir(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut tree = self.with_dir(path.clone());
        tree.unreadable.insert(path);
        tree
    }

    fn add_parents(&mut self, path: &Path) {
        let mut current = path.parent();
        while let Some(dir) = current {
            self.dirs.insert(dir.to_path_buf());
            current = dir.parent();
        }
    }

    fn denied(path: &Path) -> StorageError {
        StorageError::new(StorageErrorKind::PermissionDenied)
            .with_backend(BACKEND)
            .with_path(path)
    }
}

impl ContentTree for MockContentTree {
    fn list_entries(&self, path: &Path) -> Result<Vec<Entry>, StorageError> {
        if self.unreadable.contains(path) {
            return Err(Self::denied(path));
        }
        if !self.dirs.contains(path) {
            let kind = if self.files.contains_key(path) {
                StorageErrorKind::InvalidPath
            } else {
                StorageErrorKind::NotFound
            };
            return Err(StorageError::new(kind)
                .with_backend(BACKEND)
                .with_path(path));
        }

        let is_child = |p: &&PathBuf| p.parent() == Some(path) && p.as_path() != path;
        let name = |p: &PathBuf| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };

        let dirs = self.dirs.iter().filter(is_child).map(|p| Entry::dir(name(p)));
        let files = self
            .files
            .keys()
            .filter(is_child)
            .map(|p| Entry::file(name(p)));

        Ok(dirs.chain(files).collect())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        if self.unreadable.contains(path) {
            return Err(Self::denied(path));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }
}
