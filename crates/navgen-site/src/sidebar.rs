//! Sidebar tree construction.
//!
//! Documents are folded into a directory tree that mirrors their logical
//! paths, then emitted as [`SidebarNode`]s. A directory becomes a group;
//! its index document supplies the group's link, title and position and is
//! not repeated among the children. The root index is dropped unless
//! [`SiteOptions::include_root_index`] is set.
//!
//! Siblings keep discovery order, optionally reordered by frontmatter
//! `order`. The sort is stable: ordered entries come first, ascending, and
//! unordered entries follow in discovery order.

use std::cmp::Ordering;

use crate::locale::Locale;
use crate::navigation::SidebarNode;
use crate::options::SiteOptions;
use crate::path::PathResolver;
use crate::scanner::DocumentDescriptor;
use crate::title::title_from_segment;

/// Item within a directory, in insertion order.
enum Item<'d> {
    Doc(&'d DocumentDescriptor),
    /// Index into [`DirNode::dirs`].
    Dir(usize),
}

struct DirNode<'d> {
    name: &'d str,
    index: Option<&'d DocumentDescriptor>,
    items: Vec<Item<'d>>,
    dirs: Vec<DirNode<'d>>,
}

impl<'d> DirNode<'d> {
    fn new(name: &'d str) -> Self {
        Self {
            name,
            index: None,
            items: Vec::new(),
            dirs: Vec::new(),
        }
    }

    fn child_dir(&mut self, name: &'d str) -> &mut DirNode<'d> {
        let pos = match self.dirs.iter().position(|d| d.name == name) {
            Some(pos) => pos,
            None => {
                self.dirs.push(DirNode::new(name));
                self.items.push(Item::Dir(self.dirs.len() - 1));
                self.dirs.len() - 1
            }
        };
        &mut self.dirs[pos]
    }
}

/// Ascending by order; ordered before unordered; unordered ties are equal.
fn compare_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Builds a locale's sidebar from its scanned documents.
pub struct SidebarBuilder<'a> {
    resolver: &'a PathResolver<'a>,
    options: &'a SiteOptions,
}

impl<'a> SidebarBuilder<'a> {
    /// Create a builder.
    #[must_use]
    pub fn new(resolver: &'a PathResolver<'a>, options: &'a SiteOptions) -> Self {
        Self { resolver, options }
    }

    /// Build the sidebar for `locale` from documents in discovery order.
    #[must_use]
    pub fn build(&self, locale: &Locale, documents: &[DocumentDescriptor]) -> Vec<SidebarNode> {
        let mut root = DirNode::new("");

        for doc in documents {
            let dir_path = doc
                .logical_path
                .rsplit_once('/')
                .map_or("", |(dir, _)| dir);

            if doc.is_index && dir_path.is_empty() {
                if self.options.include_root_index {
                    root.items.push(Item::Doc(doc));
                }
                continue;
            }

            let mut node = &mut root;
            if !dir_path.is_empty() {
                for segment in dir_path.split('/') {
                    node = node.child_dir(segment);
                }
            }

            if doc.is_index && node.index.is_none() {
                node.index = Some(doc);
            } else {
                node.items.push(Item::Doc(doc));
            }
        }

        self.build_items(locale, &root, 0)
    }

    fn build_items(&self, locale: &Locale, node: &DirNode<'_>, depth: usize) -> Vec<SidebarNode> {
        let mut entries: Vec<(Option<f64>, SidebarNode)> = node
            .items
            .iter()
            .map(|item| match item {
                Item::Doc(doc) => (
                    doc.order,
                    SidebarNode::leaf(
                        doc.title.clone(),
                        self.resolver.to_url(locale, &doc.logical_path),
                    ),
                ),
                Item::Dir(pos) => {
                    let dir = &node.dirs[*pos];
                    (
                        dir.index.and_then(|index| index.order),
                        self.build_group(locale, dir, depth + 1),
                    )
                }
            })
            .collect();

        if self.options.sort_by_frontmatter_order {
            entries.sort_by(|(a, _), (b, _)| compare_order(*a, *b));
        }

        entries.into_iter().map(|(_, node)| node).collect()
    }

    fn build_group(&self, locale: &Locale, dir: &DirNode<'_>, depth: usize) -> SidebarNode {
        let title = match dir.index {
            Some(index) => index
                .frontmatter
                .group_title()
                .map_or_else(|| index.title.clone(), str::to_owned),
            None => title_from_segment(dir.name, &self.options.titles),
        };
        let url = dir
            .index
            .map(|index| self.resolver.to_url(locale, &index.logical_path));
        let collapsed = dir
            .index
            .and_then(|index| index.frontmatter.collapsed())
            .unwrap_or_else(|| self.default_collapsed(depth));

        SidebarNode::Group {
            title,
            url,
            collapsed,
            children: self.build_items(locale, dir, depth),
        }
    }

    fn default_collapsed(&self, depth: usize) -> bool {
        self.options.collapsed || self.options.collapse_depth.is_some_and(|d| depth >= d)
    }
}

#[cfg(test)]
mod tests {
    use navgen_storage::Frontmatter;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::locale::LocaleRegistry;

    fn doc(path: &str, title: &str, order: Option<f64>) -> DocumentDescriptor {
        DocumentDescriptor {
            logical_path: path.to_owned(),
            frontmatter: Frontmatter::default(),
            title: title.to_owned(),
            order,
            is_index: path == "index" || path.ends_with("/index"),
        }
    }

    fn registry() -> LocaleRegistry {
        let mut registry = LocaleRegistry::new();
        registry.register(Locale::default_locale("en")).unwrap();
        registry.register(Locale::new("zh", "zh")).unwrap();
        registry
    }

    fn build(options: &SiteOptions, locale: &str, docs: &[DocumentDescriptor]) -> Vec<SidebarNode> {
        let registry = registry();
        let resolver = PathResolver::new(&registry);
        let builder = SidebarBuilder::new(&resolver, options);
        builder.build(registry.resolve(locale).unwrap(), docs)
    }

    fn titles(nodes: &[SidebarNode]) -> Vec<&str> {
        nodes.iter().map(SidebarNode::title).collect()
    }

    #[test]
    fn test_basic_group() {
        let docs = vec![
            doc("intro", "Intro", None),
            doc("guide/index", "Guide", None),
            doc("guide/setup", "Setup", None),
        ];

        let sidebar = build(&SiteOptions::default(), "en", &docs);

        assert_eq!(
            sidebar,
            vec![
                SidebarNode::leaf("Intro", "/intro"),
                SidebarNode::Group {
                    title: "Guide".to_owned(),
                    url: Some("/guide/".to_owned()),
                    collapsed: false,
                    children: vec![SidebarNode::leaf("Setup", "/guide/setup")],
                },
            ]
        );
    }

    #[test]
    fn test_prefixed_locale_urls() {
        let docs = vec![doc("guide/index", "指南", None), doc("guide/setup", "安装", None)];

        let sidebar = build(&SiteOptions::default(), "zh", &docs);

        assert_eq!(sidebar[0].url(), Some("/zh/guide/"));
        assert_eq!(sidebar[0].children()[0].url(), Some("/zh/guide/setup"));
    }

    #[test]
    fn test_order_sorting_is_stable() {
        let docs = vec![
            doc("a", "A", Some(3.0)),
            doc("b", "B", Some(1.0)),
            doc("c", "C", None),
            doc("d", "D", Some(2.0)),
        ];

        let sidebar = build(&SiteOptions::default(), "en", &docs);

        assert_eq!(titles(&sidebar), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn test_unordered_keep_discovery_order() {
        let docs = vec![
            doc("z", "Z", None),
            doc("a", "A", None),
            doc("m", "M", Some(0.5)),
            doc("b", "B", None),
        ];

        let sidebar = build(&SiteOptions::default(), "en", &docs);

        assert_eq!(titles(&sidebar), vec!["M", "Z", "A", "B"]);
    }

    #[test]
    fn test_sorting_disabled() {
        let docs = vec![doc("a", "A", Some(3.0)), doc("b", "B", Some(1.0))];
        let options = SiteOptions {
            sort_by_frontmatter_order: false,
            ..SiteOptions::default()
        };

        assert_eq!(titles(&build(&options, "en", &docs)), vec!["A", "B"]);
    }

    #[test]
    fn test_group_positioned_by_index_order() {
        let docs = vec![
            doc("intro", "Intro", Some(2.0)),
            doc("guide/index", "Guide", Some(1.0)),
            doc("guide/setup", "Setup", None),
        ];

        let sidebar = build(&SiteOptions::default(), "en", &docs);

        assert_eq!(titles(&sidebar), vec!["Guide", "Intro"]);
    }

    #[test]
    fn test_group_without_index() {
        let docs = vec![doc("api/users", "Users", None)];

        let sidebar = build(&SiteOptions::default(), "en", &docs);

        assert_eq!(
            sidebar,
            vec![SidebarNode::Group {
                title: "Api".to_owned(),
                url: None,
                collapsed: false,
                children: vec![SidebarNode::leaf("Users", "/api/users")],
            }]
        );
    }

    #[test]
    fn test_group_with_only_index() {
        let docs = vec![doc("about/index", "About", None)];

        let sidebar = build(&SiteOptions::default(), "en", &docs);

        assert!(sidebar[0].is_group());
        assert_eq!(sidebar[0].url(), Some("/about/"));
        assert!(sidebar[0].children().is_empty());
    }

    #[test]
    fn test_nested_groups() {
        let docs = vec![
            doc("guide/index", "Guide", None),
            doc("guide/advanced/index", "Advanced", None),
            doc("guide/advanced/tuning", "Tuning", None),
        ];

        let sidebar = build(&SiteOptions::default(), "en", &docs);
        let advanced = &sidebar[0].children()[0];

        assert_eq!(advanced.title(), "Advanced");
        assert_eq!(advanced.url(), Some("/guide/advanced/"));
        assert_eq!(titles(advanced.children()), vec!["Tuning"]);
    }

    #[test]
    fn test_root_index_excluded_by_default() {
        let docs = vec![doc("index", "Home", None), doc("intro", "Intro", None)];

        let sidebar = build(&SiteOptions::default(), "en", &docs);

        assert_eq!(titles(&sidebar), vec!["Intro"]);
    }

    #[test]
    fn test_root_index_included() {
        let docs = vec![doc("index", "Home", None), doc("intro", "Intro", None)];
        let options = SiteOptions {
            include_root_index: true,
            ..SiteOptions::default()
        };

        let sidebar = build(&options, "zh", &docs);

        assert_eq!(sidebar[0], SidebarNode::leaf("Home", "/zh/"));
    }

    #[test]
    fn test_group_title_from_frontmatter() {
        let mut index = doc("guide/index", "Guide Overview", None);
        index.frontmatter = Frontmatter::new().with("groupTitle", json!("Guides"));

        let sidebar = build(&SiteOptions::default(), "en", &[index]);

        assert_eq!(sidebar[0].title(), "Guides");
    }

    #[test]
    fn test_group_title_from_index_title() {
        let docs = vec![doc("guide/index", "Guide Overview", None)];

        let sidebar = build(&SiteOptions::default(), "en", &docs);

        assert_eq!(sidebar[0].title(), "Guide Overview");
    }

    #[test]
    fn test_collapsed_global() {
        let docs = vec![doc("guide/setup", "Setup", None)];
        let options = SiteOptions {
            collapsed: true,
            ..SiteOptions::default()
        };

        let sidebar = build(&options, "en", &docs);

        assert!(matches!(sidebar[0], SidebarNode::Group { collapsed: true, .. }));
    }

    #[test]
    fn test_collapse_depth() {
        let docs = vec![
            doc("a/one", "One", None),
            doc("a/b/two", "Two", None),
            doc("a/b/c/three", "Three", None),
        ];
        let options = SiteOptions {
            collapse_depth: Some(2),
            ..SiteOptions::default()
        };

        let sidebar = build(&options, "en", &docs);
        let a = &sidebar[0];
        let b = &a.children()[1];
        let c = &b.children()[1];

        assert!(matches!(a, SidebarNode::Group { collapsed: false, .. }));
        assert!(matches!(b, SidebarNode::Group { collapsed: true, .. }));
        assert!(matches!(c, SidebarNode::Group { collapsed: true, .. }));
    }

    #[test]
    fn test_collapsed_from_index_frontmatter() {
        let mut index = doc("guide/index", "Guide", None);
        index.frontmatter = Frontmatter::new().with("collapsed", json!(false));
        let options = SiteOptions {
            collapsed: true,
            ..SiteOptions::default()
        };

        let sidebar = build(&options, "en", &[index]);

        assert!(matches!(sidebar[0], SidebarNode::Group { collapsed: false, .. }));
    }

    #[test]
    fn test_empty_documents() {
        assert!(build(&SiteOptions::default(), "en", &[]).is_empty());
    }

    #[test]
    fn test_every_document_appears_once() {
        let docs = vec![
            doc("intro", "Intro", None),
            doc("guide/index", "Guide", None),
            doc("guide/setup", "Setup", Some(1.0)),
            doc("guide/deep/index", "Deep", None),
            doc("guide/deep/more", "More", None),
            doc("api/users", "Users", None),
        ];

        let sidebar = build(&SiteOptions::default(), "en", &docs);

        fn urls<'n>(nodes: &'n [SidebarNode], out: &mut Vec<&'n str>) {
            for node in nodes {
                if let Some(url) = node.url() {
                    out.push(url);
                }
                urls(node.children(), out);
            }
        }
        let mut found = Vec::new();
        urls(&sidebar, &mut found);
        found.sort_unstable();

        assert_eq!(
            found,
            vec!["/api/users", "/guide/", "/guide/deep/", "/guide/deep/more", "/guide/setup", "/intro"]
        );
    }
}
