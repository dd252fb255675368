//! Locale-aware content discovery and navigation generation.
//!
//! This crate provides:
//! - [`LocaleRegistry`]: Known locales, their URL prefixes and top-nav labels
//! - [`PathResolver`]: Bidirectional logical path / URL mapping
//! - [`ContentScanner`]: Document discovery over a [`ContentTree`](navgen_storage::ContentTree)
//! - [`SidebarBuilder`]: Sidebar trees from scanned documents
//! - [`SiteConfigAssembler`]: Navigation for every locale in one pass
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::collections::HashMap;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use navgen_site::{Locale, LocaleRegistry, SiteConfigAssembler, SiteOptions};
//! use navgen_storage_fs::{FsContentTree, YamlFrontmatter};
//!
//! let mut registry = LocaleRegistry::new();
//! registry.register(Locale::default_locale("en"))?;
//! registry.register(Locale::new("zh", "zh"))?;
//!
//! let roots = HashMap::from([
//!     ("en".to_owned(), PathBuf::from("docs/en")),
//!     ("zh".to_owned(), PathBuf::from("docs/zh")),
//! ]);
//!
//! let assembler = SiteConfigAssembler::new(
//!     Arc::new(FsContentTree),
//!     Arc::new(YamlFrontmatter),
//!     SiteOptions::default(),
//! );
//! let assembly = assembler.assemble(&registry, &roots)?;
//! println!("{}", assembly.navigation.to_json()?);
//! # Ok(())
//! # }
//! ```

mod assembler;
mod locale;
mod navigation;
mod options;
mod path;
mod scanner;
mod sidebar;
mod title;
mod warning;

pub use assembler::{Assembly, AssemblyError, SiteConfigAssembler};
pub use locale::{Locale, LocaleError, LocaleRegistry};
pub use navigation::{LocaleNavigation, NavEntry, NavigationConfig, SidebarNode};
pub use options::{SiteOptions, TitleOptions};
pub use path::{DEFAULT_INDEX_NAME, PathResolver, Rewrite, UrlError};
pub use scanner::{ContentScanner, DocumentDescriptor, Scan};
pub use sidebar::SidebarBuilder;
pub use warning::{Warning, WarningKind};
