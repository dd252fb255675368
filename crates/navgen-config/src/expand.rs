//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Strings without `${` are returned unchanged, so a bare `$VAR` is kept
/// literally.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NAVGEN_TEST_DOCS", "/srv/docs");
        }
        let result = expand_env("${NAVGEN_TEST_DOCS}/en", "docs.source_dir").unwrap();
        assert_eq!(result, "/srv/docs/en");
        unsafe {
            std::env::remove_var("NAVGEN_TEST_DOCS");
        }
    }

    #[test]
    fn test_expand_default_used() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NAVGEN_TEST_UNSET");
        }
        let result = expand_env("${NAVGEN_TEST_UNSET:-content}", "docs.source_dir").unwrap();
        assert_eq!(result, "content");
    }

    #[test]
    fn test_expand_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NAVGEN_TEST_MISSING");
        }
        let err = expand_env("${NAVGEN_TEST_MISSING}", "docs.source_dir").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in docs.source_dir: ${NAVGEN_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("docs", "f").unwrap(), "docs");
        assert_eq!(expand_env("$HOME/docs", "f").unwrap(), "$HOME/docs");
    }
}
