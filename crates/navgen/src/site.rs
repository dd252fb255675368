//! Conversion from loaded configuration to engine inputs.

use std::collections::HashMap;
use std::path::PathBuf;

use navgen_config::Config;
use navgen_site::{Locale, LocaleError, LocaleRegistry, Rewrite, SiteOptions, TitleOptions};

/// Engine options from the `[docs]`, `[sidebar]` and `[[rewrites]]` sections.
pub(crate) fn site_options(config: &Config) -> SiteOptions {
    let docs = &config.docs_resolved;
    let sidebar = &config.sidebar;

    SiteOptions {
        index_name: docs.index_name.clone(),
        extensions: docs.extensions.clone(),
        exclude: docs.exclude.clone(),
        collapsed: sidebar.collapsed,
        collapse_depth: sidebar.collapse_depth,
        sort_by_frontmatter_order: sidebar.sort_menus_by_frontmatter_order,
        include_root_index: sidebar.include_root_index,
        rewrites: config
            .rewrites
            .iter()
            .map(|r| Rewrite::new(&r.from, &r.to))
            .collect(),
        titles: TitleOptions {
            use_frontmatter: sidebar.use_title_from_frontmatter,
            use_heading: sidebar.use_title_from_heading,
            capitalize_first: sidebar.capitalize_first,
            hyphen_to_space: sidebar.hyphen_to_space,
            underscore_to_space: sidebar.underscore_to_space,
        },
    }
}

/// Registry of the configured locales, in declaration order.
pub(crate) fn locale_registry(config: &Config) -> Result<LocaleRegistry, LocaleError> {
    let mut registry = LocaleRegistry::new();
    for resolved in &config.locales_resolved {
        let locale = if resolved.is_default {
            Locale::default_locale(&resolved.id)
        } else {
            Locale::new(&resolved.id, &resolved.prefix)
        };
        let locale = resolved
            .labels
            .iter()
            .fold(locale, |locale, (path, label)| locale.with_label(path, label));
        registry.register(locale)?;
    }
    Ok(registry)
}

/// Absolute content root per locale id.
pub(crate) fn locale_roots(config: &Config) -> HashMap<String, PathBuf> {
    config
        .locales_resolved
        .iter()
        .map(|locale| (locale.id.clone(), config.locale_root(locale)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    fn load(dir: &Path, toml: &str) -> Config {
        let path = dir.join("navgen.toml");
        std::fs::write(&path, toml).unwrap();
        Config::load(Some(&path), None).unwrap()
    }

    #[test]
    fn test_site_options() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(
            dir.path(),
            r#"
[docs]
index_name = "README"
extensions = ["md", "mdx"]
exclude = ["drafts"]

[sidebar]
collapse_depth = 2
hyphen_to_space = true
use_title_from_heading = true
sort_menus_by_frontmatter_order = false

[[rewrites]]
from = "pages"
to = ""
"#,
        );

        let options = site_options(&config);

        assert_eq!(
            options,
            SiteOptions {
                index_name: "README".to_owned(),
                extensions: vec!["md".to_owned(), "mdx".to_owned()],
                exclude: vec!["drafts".to_owned()],
                collapsed: false,
                collapse_depth: Some(2),
                sort_by_frontmatter_order: false,
                include_root_index: false,
                rewrites: vec![Rewrite::new("pages", "")],
                titles: TitleOptions {
                    use_frontmatter: true,
                    use_heading: true,
                    capitalize_first: true,
                    hyphen_to_space: true,
                    underscore_to_space: false,
                },
            }
        );
    }

    #[test]
    fn test_default_options_match_engine_defaults() {
        assert_eq!(site_options(&Config::default()), SiteOptions::default());
    }

    #[test]
    fn test_locale_registry_and_roots() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(
            dir.path(),
            r#"
default_locale = "en"

[[locales]]
id = "en"
root = "en"
labels = { "guide/index" = "Guide" }

[[locales]]
id = "zh"
prefix = "cn"
"#,
        );

        let registry = locale_registry(&config).unwrap();
        let roots = locale_roots(&config);

        let ids: Vec<_> = registry.locales().iter().map(Locale::id).collect();
        assert_eq!(ids, vec!["en", "zh"]);
        assert_eq!(registry.default_locale().unwrap().id(), "en");
        assert_eq!(registry.resolve("zh").unwrap().url_prefix(), "cn");
        assert_eq!(
            registry.resolve("en").unwrap().display_labels().get("guide/index"),
            Some(&"Guide".to_owned())
        );
        assert_eq!(roots["en"], dir.path().join("docs/en"));
        assert_eq!(roots["zh"], dir.path().join("docs/zh"));
    }

    #[test]
    fn test_implicit_locale() {
        let config = Config::default();

        let registry = locale_registry(&config).unwrap();
        let roots = locale_roots(&config);

        assert_eq!(registry.len(), 1);
        assert!(registry.default_locale().unwrap().is_default());
        assert_eq!(roots.len(), 1);
    }
}
