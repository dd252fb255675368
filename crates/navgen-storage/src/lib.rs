//! Content tree abstraction for the navgen navigation engine.
//!
//! This crate provides the two collaborators the engine consumes:
//!
//! - [`ContentTree`]: a directory-like walker with `list_entries()` and `read_file()`
//! - [`FrontmatterExtractor`]: turns raw document bytes into typed [`Frontmatter`]
//!
//! Keeping them behind traits lets the engine run against the real filesystem
//! (`navgen-storage-fs`) or an in-memory tree in tests.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentTree`] trait and [`Entry`] listing items
//! - [`StorageError`] with a semantic [`StorageErrorKind`]
//! - [`Frontmatter`] with typed accessors for recognized keys
//! - [`MockContentTree`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use navgen_storage::ContentTree;
//!
//! for entry in tree.list_entries(Path::new("docs"))? {
//!     println!("{} (dir: {})", entry.name, entry.is_dir);
//! }
//! ```

mod frontmatter;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use frontmatter::{Frontmatter, FrontmatterError, FrontmatterExtractor, split_frontmatter};
#[cfg(feature = "mock")]
pub use mock::MockContentTree;
pub use storage::{ContentTree, Entry, StorageError, StorageErrorKind};
