//! Page assembly.
//!
//! [`Site`] ties the route table, the content loader and the renderer
//! together. For a requested path it resolves the route, loads and renders
//! the backing markdown, extracts the outline and derives breadcrumbs, pager
//! and sidebar state. Content failures never abort a view: they are logged
//! and reported in [`PageContent::Failed`] while navigation still renders.

use std::path::PathBuf;
use std::sync::Arc;

use docnav_storage::{Storage, StorageErrorKind};
use serde::Serialize;

use crate::headings::{Heading, extract_headings};
use crate::navigation::{NavigationController, NavigationState};
use crate::render::{RenderOptions, render_html};
use crate::route_table::{
    BreadcrumbItem, Pager, PagerMode, Route, RouteTable, RouteTableError, normalize_path,
};
use crate::routes_file::{RoutesFileError, load_routes};

/// Site configuration.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// YAML file with the route tree.
    pub routes_file: PathBuf,
    /// Prefix for relative route keys.
    pub base_path: String,
    /// Top-level section expanded when no section matches.
    pub default_section: Option<String>,
    /// Previous/next derivation.
    pub pager: PagerMode,
    /// Markdown renderer options.
    pub render: RenderOptions,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            routes_file: PathBuf::from("routes.yaml"),
            base_path: "/docs".to_owned(),
            default_section: None,
            pager: PagerMode::default(),
            render: RenderOptions::default(),
        }
    }
}

/// Error returned when a site cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error(transparent)]
    Routes(#[from] RoutesFileError),
    #[error(transparent)]
    Table(#[from] RouteTableError),
}

/// Why a route's content could not be shown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ContentError {
    /// The markdown resource does not exist.
    #[error("Markdown resource not found: {markdown}")]
    ResourceNotFound { markdown: String },
    /// The markdown resource could not be loaded.
    #[error("Markdown resource unavailable: {markdown}: {message}")]
    Unavailable { markdown: String, message: String },
}

/// Content of an assembled page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PageContent {
    /// Markdown was loaded and rendered.
    Loaded { html: String },
    /// The route has no markdown (section header) or does not exist.
    NoContent,
    /// Loading failed; the view renders without content.
    Failed { error: ContentError },
}

/// Resolved route summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    /// Display title.
    pub title: String,
    /// Canonical path.
    pub path: String,
    /// Markdown resource, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    /// Whether the route has children.
    pub is_section: bool,
}

impl From<Route<'_>> for RouteInfo {
    fn from(route: Route<'_>) -> Self {
        Self {
            title: route.name().to_owned(),
            path: route.path().to_owned(),
            markdown: route.markdown().map(str::to_owned),
            is_section: route.is_section(),
        }
    }
}

/// A fully assembled page view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    /// Normalized request path.
    pub path: String,
    /// Resolved route, `None` if the path is not in the table.
    pub route: Option<RouteInfo>,
    /// Page content.
    pub content: PageContent,
    /// "On this page" outline.
    pub headings: Vec<Heading>,
    /// Ancestor chain.
    pub breadcrumbs: Vec<BreadcrumbItem>,
    /// Previous/next links.
    pub pager: Pager,
    /// Sidebar state.
    pub navigation: NavigationState,
}

impl PageView {
    /// Whether the requested path resolved to a route.
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.route.is_some()
    }
}

/// A route whose markdown resource is missing from storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MissingContent {
    /// Route path.
    pub path: String,
    /// Missing markdown resource.
    pub markdown: String,
}

/// Documentation site: route table plus content loader.
///
/// Cheap to share behind an `Arc`; all state is immutable.
pub struct Site {
    table: Arc<RouteTable>,
    storage: Arc<dyn Storage>,
    navigation: NavigationController,
    pager: PagerMode,
    render: RenderOptions,
}

impl Site {
    /// Create a site from a built route table.
    #[must_use]
    pub fn new(table: RouteTable, storage: Arc<dyn Storage>, config: &SiteConfig) -> Self {
        let table = Arc::new(table);
        Self {
            navigation: NavigationController::new(Arc::clone(&table)),
            table,
            storage,
            pager: config.pager,
            render: config.render,
        }
    }

    /// Load the route file and build the site.
    pub fn open(config: &SiteConfig, storage: Arc<dyn Storage>) -> Result<Self, SiteError> {
        let nodes = load_routes(&config.routes_file)?;
        let mut table = RouteTable::from_nodes(nodes)?.with_base_path(&config.base_path);
        if let Some(section) = &config.default_section {
            table = table.with_default_section(section)?;
        }
        tracing::info!(
            routes = table.len(),
            routes_file = %config.routes_file.display(),
            "Route table built"
        );
        Ok(Self::new(table, storage, config))
    }

    /// The route table.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Sidebar state for `active_path`.
    #[must_use]
    pub fn navigation(&self, active_path: &str) -> NavigationState {
        self.navigation.navigation(active_path)
    }

    /// Assemble the page view for `path`.
    ///
    /// Never fails: unknown paths yield a view with `route: None`, content
    /// failures a view with [`PageContent::Failed`].
    #[must_use]
    pub fn page(&self, path: &str) -> PageView {
        let path = normalize_path(path);
        let navigation = self.navigation.navigation(&path);

        let Some(route) = self.table.resolve(&path) else {
            tracing::debug!(path = %path, "Route not found");
            return PageView {
                path,
                route: None,
                content: PageContent::NoContent,
                headings: Vec::new(),
                breadcrumbs: Vec::new(),
                pager: Pager::default(),
                navigation,
            };
        };

        let (content, headings) = match route.markdown() {
            Some(markdown) => self.load_content(&path, markdown),
            None => (PageContent::NoContent, Vec::new()),
        };

        PageView {
            route: Some(RouteInfo::from(route)),
            content,
            headings,
            breadcrumbs: route.breadcrumbs(),
            pager: route.pager(self.pager),
            navigation,
            path,
        }
    }

    /// Routes whose markdown resource does not exist in storage.
    #[must_use]
    pub fn missing_content(&self) -> Vec<MissingContent> {
        self.table
            .reading_order()
            .filter_map(|route| {
                let markdown = route.markdown()?;
                (!self.storage.exists(markdown)).then(|| MissingContent {
                    path: route.path().to_owned(),
                    markdown: markdown.to_owned(),
                })
            })
            .collect()
    }

    fn load_content(&self, path: &str, markdown: &str) -> (PageContent, Vec<Heading>) {
        match self.storage.read(markdown) {
            Ok(text) => {
                let headings = extract_headings(&text);
                let html = render_html(&text, self.render);
                (PageContent::Loaded { html }, headings)
            }
            Err(e) => {
                tracing::warn!(path = %path, markdown = %markdown, error = %e, "Failed to load page content");
                let error = if e.kind() == StorageErrorKind::NotFound {
                    ContentError::ResourceNotFound {
                        markdown: markdown.to_owned(),
                    }
                } else {
                    ContentError::Unavailable {
                        markdown: markdown.to_owned(),
                        message: e.to_string(),
                    }
                };
                (PageContent::Failed { error }, Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use docnav_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::route_table::tests::sample_table;

    fn site_with(storage: MockStorage) -> Site {
        Site::new(sample_table(), Arc::new(storage), &SiteConfig::default())
    }

    #[test]
    fn test_page_loads_content_and_outline() {
        let site = site_with(MockStorage::new().with_content(
            "core-component/log/config.md",
            "# Config\n\n## Options\n\n### Level\n\n## Example `code`\n",
        ));

        let view = site.page("/docs/core-component/log/config");

        assert!(view.is_found());
        let PageContent::Loaded { html } = &view.content else {
            panic!("expected loaded content, got {:?}", view.content);
        };
        assert!(html.contains("<h2 id=\"options\">Options</h2>"));
        let slugs: Vec<_> = view.headings.iter().map(|h| h.slug.as_str()).collect();
        assert_eq!(slugs, vec!["#options", "#level"]);
        assert_eq!(view.breadcrumbs.len(), 2);
        assert_eq!(
            view.pager.next.as_ref().map(|l| l.path.as_str()),
            Some("/docs/core-component/log/flags")
        );
        assert!(view.navigation.is_expanded("/docs/core-component/log"));
    }

    #[test]
    fn test_page_unknown_route() {
        let site = site_with(MockStorage::new());

        let view = site.page("/docs/core-component/logger");

        assert!(!view.is_found());
        assert_eq!(view.content, PageContent::NoContent);
        assert!(view.headings.is_empty());
        assert_eq!(view.pager, Pager::default());
        assert!(view.navigation.is_expanded("/docs/core-component"));
    }

    #[test]
    fn test_page_section_without_markdown() {
        let site = site_with(MockStorage::new());

        let view = site.page("/docs/core-component");

        assert!(view.is_found());
        assert_eq!(view.content, PageContent::NoContent);
        assert!(view.route.unwrap().is_section);
    }

    #[test]
    fn test_page_missing_resource() {
        let site = site_with(MockStorage::new());

        let view = site.page("/docs/faq");

        assert_eq!(
            view.content,
            PageContent::Failed {
                error: ContentError::ResourceNotFound {
                    markdown: "faq.md".to_owned(),
                },
            }
        );
        // Navigation still renders.
        assert_eq!(view.navigation.items.len(), 3);
        assert!(view.pager.previous.is_some());
    }

    #[test]
    fn test_page_unavailable_resource() {
        let site = site_with(MockStorage::new().with_failure("faq.md", StorageErrorKind::Timeout));

        let view = site.page("/docs/faq");

        let PageContent::Failed {
            error: ContentError::Unavailable { markdown, .. },
        } = view.content
        else {
            panic!("expected unavailable content");
        };
        assert_eq!(markdown, "faq.md");
    }

    #[test]
    fn test_page_siblings_pager() {
        let config = SiteConfig {
            pager: PagerMode::Siblings,
            ..SiteConfig::default()
        };
        let site = Site::new(sample_table(), Arc::new(MockStorage::new()), &config);

        let view = site.page("/docs/example");

        assert_eq!(view.pager.next, None);
    }

    #[test]
    fn test_page_view_serialization() {
        let site = site_with(MockStorage::new().with_content("faq.md", "## Why?\n"));

        let json = serde_json::to_value(site.page("/docs/faq")).unwrap();

        assert_eq!(json["route"]["title"], "FAQ");
        assert_eq!(json["route"]["isSection"], false);
        assert_eq!(json["content"]["status"], "loaded");
        assert_eq!(json["headings"][0]["slug"], "#why?");
        assert_eq!(json["navigation"]["activePath"], "/docs/faq");
    }

    #[test]
    fn test_failed_content_serialization() {
        let content = PageContent::Failed {
            error: ContentError::ResourceNotFound {
                markdown: "faq.md".to_owned(),
            },
        };

        let json = serde_json::to_value(content).unwrap();

        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"]["kind"], "resourceNotFound");
        assert_eq!(json["error"]["markdown"], "faq.md");
    }

    #[test]
    fn test_missing_content() {
        let storage = MockStorage::new()
            .with_content("quick-start/index.md", "")
            .with_content("quick-start/installation.md", "")
            .with_content("quick-start/create-application.md", "")
            .with_content("quick-start/example.md", "")
            .with_content("core-component/log.md", "")
            .with_content("core-component/log/config.md", "")
            .with_content("core-component/log/flags.md", "")
            .with_content("core-component/log/rotate.md", "")
            .with_content("core-component/config.md", "");
        let site = site_with(storage);

        assert_eq!(
            site.missing_content(),
            vec![MissingContent {
                path: "/docs/faq".to_owned(),
                markdown: "faq.md".to_owned(),
            }]
        );
    }

    #[test]
    fn test_open_from_routes_file() {
        let dir = tempfile::tempdir().unwrap();
        let routes_file = dir.path().join("routes.yaml");
        std::fs::write(
            &routes_file,
            "- name: Guide\n  path: /docs/guide\n  children:\n    - name: Intro\n      path: /docs/guide/intro\n      markdown: intro.md\n",
        )
        .unwrap();
        let config = SiteConfig {
            routes_file,
            default_section: Some("/docs/guide".to_owned()),
            ..SiteConfig::default()
        };

        let site = Site::open(&config, Arc::new(MockStorage::new())).unwrap();

        assert_eq!(site.table().len(), 2);
        assert!(site.table().resolve_relative("guide/intro").is_some());
    }

    #[test]
    fn test_open_rejects_duplicate_paths() {
        let dir = tempfile::tempdir().unwrap();
        let routes_file = dir.path().join("routes.yaml");
        std::fs::write(
            &routes_file,
            "- name: A\n  path: /docs/a\n- name: B\n  path: /docs/a\n",
        )
        .unwrap();
        let config = SiteConfig {
            routes_file,
            ..SiteConfig::default()
        };

        let result = Site::open(&config, Arc::new(MockStorage::new()));

        assert!(matches!(
            result,
            Err(SiteError::Table(RouteTableError::DuplicatePath(_)))
        ));
    }
}
