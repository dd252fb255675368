//! CLI error types.

use navgen_config::ConfigError;
use navgen_site::{AssemblyError, LocaleError, UrlError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Locale(#[from] LocaleError),

    #[error("{0}")]
    Assembly(#[from] AssemblyError),

    #[error("{0}")]
    Url(#[from] UrlError),

    #[error("Failed to serialize navigation: {0}")]
    Json(#[from] serde_json::Error),
}
