//! `navgen build` command implementation.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use navgen_config::{CliSettings, Config};
use navgen_site::SiteConfigAssembler;
use navgen_storage_fs::{FsContentTree, YamlFrontmatter};

use crate::error::CliError;
use crate::output::Output;
use crate::site::{locale_registry, locale_roots, site_options};

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover navgen.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long, env = "NAVGEN_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Write JSON to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Start every sidebar group collapsed.
    #[arg(long)]
    collapsed: bool,

    /// Keep the root index document in the sidebar.
    #[arg(long)]
    include_root_index: bool,

    /// Fail if any warning is recorded.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, the output can't be
    /// written, or `--strict` is set and warnings were recorded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            collapsed: self.collapsed.then_some(true),
            include_root_index: self.include_root_index.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.source_dir(&config.docs_resolved.source_dir);

        let registry = locale_registry(&config)?;
        let roots = locale_roots(&config);
        let assembler = SiteConfigAssembler::new(
            Arc::new(FsContentTree),
            Arc::new(YamlFrontmatter),
            site_options(&config),
        );

        let assembly = assembler.assemble(&registry, &roots)?;
        output.warnings(&assembly.warnings);

        let navigation = if self.strict {
            assembly.into_strict()?
        } else {
            assembly.navigation
        };
        let json = navigation.to_json()?;

        if let Some(path) = &self.output {
            std::fs::write(path, format!("{json}\n"))?;
            output.written(path, navigation.locales().len());
        } else {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use navgen_site::AssemblyError;
    use serde_json::{Value, json};

    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn args(dir: &Path, strict: bool) -> BuildArgs {
        BuildArgs {
            config: Some(dir.join("navgen.toml")),
            source_dir: None,
            output: Some(dir.join("nav.json")),
            collapsed: false,
            include_root_index: false,
            strict,
            verbose: false,
        }
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "navgen.toml",
            r#"
default_locale = "en"

[[locales]]
id = "en"
root = "en"

[[locales]]
id = "zh"
"#,
        );
        write(dir.path(), "docs/en/intro.md", "---\ntitle: Intro\n---\n");
        write(dir.path(), "docs/zh/intro.md", "---\ntitle: 介绍\n---\n");
        dir
    }

    #[test]
    fn test_build_writes_json() {
        let dir = project();

        args(dir.path(), false).execute().unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("nav.json")).unwrap())
                .unwrap();
        assert_eq!(
            written,
            json!([
                {"locale": "en", "topNav": [], "sidebar": [{"title": "Intro", "url": "/intro"}]},
                {"locale": "zh", "topNav": [], "sidebar": [{"title": "介绍", "url": "/zh/intro"}]}
            ])
        );
    }

    #[test]
    fn test_build_strict_fails_on_warnings() {
        let dir = project();
        write(dir.path(), "docs/en/bad.md", "---\norder: [1\n---\n");

        args(dir.path(), false).execute().unwrap();
        let err = args(dir.path(), true).execute().unwrap_err();

        assert!(matches!(
            err,
            CliError::Assembly(AssemblyError::Warnings(ref warnings)) if warnings.len() == 1
        ));
    }

    #[test]
    fn test_build_missing_config() {
        let dir = tempfile::tempdir().unwrap();

        let err = args(dir.path(), false).execute().unwrap_err();

        assert!(matches!(err, CliError::Config(_)));
    }
}
