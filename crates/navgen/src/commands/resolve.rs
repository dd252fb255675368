//! `navgen resolve` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use navgen_config::Config;

use crate::error::CliError;
use crate::site::{locale_registry, site_options};

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Site URL to resolve (e.g. /zh/guide/setup).
    url: String,

    /// Path to configuration file (default: auto-discover navgen.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// Prints `<locale> <logical path>` to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the URL is malformed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let line = resolve_line(&config, &self.url)?;

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        Ok(())
    }
}

fn resolve_line(config: &Config, url: &str) -> Result<String, CliError> {
    let registry = locale_registry(config)?;
    let options = site_options(config);
    let resolver = options.path_resolver(&registry);

    let (locale, logical_path) = resolver.from_url(url)?;
    tracing::debug!(url, locale = locale.id(), %logical_path, "Resolved URL");
    Ok(format!("{} {logical_path}", locale.id()))
}

#[cfg(test)]
mod tests {
    use navgen_site::UrlError;

    use super::*;

    fn config() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navgen.toml");
        std::fs::write(
            &path,
            r#"
default_locale = "en"

[[locales]]
id = "en"

[[locales]]
id = "zh"

[[rewrites]]
from = "packages/core"
to = "core"
"#,
        )
        .unwrap();
        let config = Config::load(Some(&path), None).unwrap();
        (dir, config)
    }

    #[test]
    fn test_resolve_line() {
        let (_dir, config) = config();

        assert_eq!(resolve_line(&config, "/guide/setup").unwrap(), "en guide/setup");
        assert_eq!(resolve_line(&config, "/zh/guide/").unwrap(), "zh guide/index");
        assert_eq!(
            resolve_line(&config, "/core/intro#top").unwrap(),
            "en packages/core/intro"
        );
    }

    #[test]
    fn test_resolve_malformed() {
        let (_dir, config) = config();

        let err = resolve_line(&config, "/guide/../etc").unwrap_err();

        assert!(matches!(err, CliError::Url(UrlError::Malformed { .. })));
    }
}
