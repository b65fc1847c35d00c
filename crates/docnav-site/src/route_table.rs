//! Route table for the documentation hierarchy.
//!
//! The table is defined as a tree of [`RouteNode`] values and built once at
//! startup into an immutable [`RouteTable`].
//!
//! # Architecture
//!
//! Routes are stored in a flat `Vec` in depth-first (pre-order) order, with
//! parent/children relationships tracked by indices. This provides:
//! - O(1) path lookups via the `path_index` `HashMap` (the flat dictionary
//!   view of the tree)
//! - O(d) breadcrumb building where d is the route depth
//! - reading order for free: index order *is* depth-first order
//!
//! Previous/next links are never stored; [`Route::pager`] derives them from
//! tree order on every call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A node of the route tree definition.
///
/// A node without `markdown` is a pure section header that only groups its
/// children. Child order defines sidebar order and reading order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    /// Display title.
    pub name: String,
    /// Canonical URL path (e.g., `/docs/core-component/log`).
    pub path: String,
    /// Markdown resource backing this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    /// Child routes, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    /// Create a node without content or children.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            markdown: None,
            children: Vec::new(),
        }
    }

    /// Create a page backed by a markdown resource.
    #[must_use]
    pub fn page(
        name: impl Into<String>,
        path: impl Into<String>,
        markdown: impl Into<String>,
    ) -> Self {
        Self::new(name, path).with_markdown(markdown)
    }

    /// Set the markdown resource.
    #[must_use]
    pub fn with_markdown(mut self, markdown: impl Into<String>) -> Self {
        self.markdown = Some(markdown.into());
        self
    }

    /// Set the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = children;
        self
    }
}

/// Depth-first search over a route tree definition.
///
/// Compares each node's path with `path`, then recurses into its children
/// in order, returning the first match. Unlike [`RouteTable::resolve`] the
/// path is compared as given, without normalization.
#[must_use]
pub fn find_in_tree<'a>(nodes: &'a [RouteNode], path: &str) -> Option<&'a RouteNode> {
    nodes.iter().find_map(|node| {
        if node.path == path {
            Some(node)
        } else {
            find_in_tree(&node.children, path)
        }
    })
}

/// Normalize a request path to the canonical route form.
///
/// Adds a missing leading slash and drops trailing slashes. The empty path
/// and `/` both map to `/`.
///
/// # Examples
///
/// ```
/// use docnav_site::normalize_path;
///
/// assert_eq!(normalize_path("docs/log/"), "/docs/log");
/// assert_eq!(normalize_path(""), "/");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

/// Whether `prefix` is `path` or one of its ancestor paths.
///
/// The match is segment-aware: `/docs/log` is a prefix of `/docs/log/config`
/// but not of `/docs/logx`.
#[must_use]
pub fn is_path_prefix(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return path.starts_with('/');
    }
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Error returned when a route tree definition is invalid.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    /// Two routes share the same path.
    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),
    /// A route has an empty display name.
    #[error("Route {0} has an empty name")]
    EmptyName(String),
    /// A route path is not absolute.
    #[error("Route path must start with '/': {0:?}")]
    InvalidPath(String),
    /// The configured default section is not a top-level section.
    #[error("Default section is not a top-level section: {0}")]
    UnknownDefaultSection(String),
}

/// Previous/next derivation strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PagerMode {
    /// Link to the neighbouring routes with content in depth-first order,
    /// crossing section boundaries.
    #[default]
    ReadingOrder,
    /// Link only to the adjacent siblings under the same parent.
    Siblings,
}

/// A `{name, path}` link to another route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Display title.
    pub name: String,
    /// Link target path.
    pub path: String,
}

/// Previous/next links of a route.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Pager {
    /// Link to the previous route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<NavLink>,
    /// Link to the next route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NavLink>,
}

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display title.
    pub title: String,
    /// Link target path.
    pub path: String,
}

/// Stored route data.
#[derive(Debug)]
struct RouteEntry {
    name: String,
    path: String,
    markdown: Option<String>,
}

/// Immutable route table with efficient path lookups.
///
/// Built once from a [`RouteNode`] tree; safe to share between concurrent
/// page views (it is never mutated after construction).
#[derive(Debug)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
    path_index: HashMap<String, usize>,
    /// Indices of routes with markdown, ascending (= depth-first order).
    reading_order: Vec<usize>,
    base_path: String,
    default_section: Option<usize>,
}

impl RouteTable {
    /// Build a route table from a tree definition.
    ///
    /// Paths are normalized with [`normalize_path`] and must be unique
    /// across the whole tree.
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError`] if a path is duplicated or not absolute,
    /// or a name is empty.
    pub fn from_nodes(nodes: Vec<RouteNode>) -> Result<Self, RouteTableError> {
        let mut builder = RouteTableBuilder::default();
        for node in nodes {
            builder.add_node(node, None)?;
        }
        Ok(builder.build())
    }

    /// Set the prefix used by [`resolve_relative`](Self::resolve_relative).
    #[must_use]
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = normalize_path(base_path);
        self
    }

    /// Set the top-level section expanded when no section matches.
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError::UnknownDefaultSection`] if `path` is not a
    /// top-level route with children.
    pub fn with_default_section(mut self, path: &str) -> Result<Self, RouteTableError> {
        let normalized = normalize_path(path);
        let idx = self
            .path_index
            .get(&normalized)
            .copied()
            .filter(|&idx| self.parents[idx].is_none() && !self.children[idx].is_empty())
            .ok_or(RouteTableError::UnknownDefaultSection(normalized))?;
        self.default_section = Some(idx);
        Ok(self)
    }

    /// Number of routes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prefix used by [`resolve_relative`](Self::resolve_relative).
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Resolve a request path to its route.
    ///
    /// The path is normalized first; matching is exact, so
    /// `/docs/core-component/logger` never resolves to
    /// `/docs/core-component/log`. `None` is the regular outcome for paths
    /// outside the table.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<Route<'_>> {
        self.path_index
            .get(normalize_path(path).as_str())
            .map(|&idx| self.route(idx))
    }

    /// Resolve a path by walking the tree depth-first.
    ///
    /// Visits roots in order and descends into children before moving on to
    /// the next sibling, returning the first route whose path equals the
    /// normalized `path`. Same result as [`resolve`](Self::resolve) since
    /// paths are unique; O(n) instead of O(1).
    #[must_use]
    pub fn find_depth_first(&self, path: &str) -> Option<Route<'_>> {
        let path = normalize_path(path);
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            if self.entries[idx].path == path {
                return Some(self.route(idx));
            }
            stack.extend(self.children[idx].iter().rev());
        }
        None
    }

    /// Resolve a route key relative to the base path.
    ///
    /// `resolve_relative("core-component/log")` with the default base path
    /// resolves `/docs/core-component/log`.
    #[must_use]
    pub fn resolve_relative(&self, key: &str) -> Option<Route<'_>> {
        let key = key.trim_matches('/');
        if key.is_empty() {
            return self.resolve(&self.base_path);
        }
        if self.base_path == "/" {
            return self.resolve(key);
        }
        self.resolve(&format!("{}/{key}", self.base_path))
    }

    /// Top-level routes in display order.
    pub fn roots(&self) -> impl Iterator<Item = Route<'_>> + '_ {
        self.roots.iter().map(|&idx| self.route(idx))
    }

    /// All routes in depth-first order.
    pub fn flatten(&self) -> impl Iterator<Item = Route<'_>> + '_ {
        (0..self.entries.len()).map(|idx| self.route(idx))
    }

    /// All sections (routes with children) in depth-first order.
    pub fn sections(&self) -> impl Iterator<Item = Route<'_>> + '_ {
        self.flatten().filter(Route::is_section)
    }

    /// Routes with markdown content in reading order.
    pub fn reading_order(&self) -> impl Iterator<Item = Route<'_>> + '_ {
        self.reading_order.iter().map(|&idx| self.route(idx))
    }

    /// The section expanded when the active path matches no section.
    ///
    /// The configured default section, or else the first top-level section.
    #[must_use]
    pub fn default_section(&self) -> Option<Route<'_>> {
        self.default_section
            .or_else(|| {
                self.roots
                    .iter()
                    .copied()
                    .find(|&idx| !self.children[idx].is_empty())
            })
            .map(|idx| self.route(idx))
    }

    fn route(&self, idx: usize) -> Route<'_> {
        Route { table: self, idx }
    }
}

/// Borrowed view of one route in a [`RouteTable`].
#[derive(Clone, Copy)]
pub struct Route<'a> {
    table: &'a RouteTable,
    idx: usize,
}

impl std::fmt::Debug for Route<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name())
            .field("path", &self.path())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Route<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.table, other.table) && self.idx == other.idx
    }
}

impl Eq for Route<'_> {}

impl<'a> Route<'a> {
    fn entry(&self) -> &'a RouteEntry {
        &self.table.entries[self.idx]
    }

    /// Display title.
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.entry().name
    }

    /// Canonical URL path.
    #[must_use]
    pub fn path(&self) -> &'a str {
        &self.entry().path
    }

    /// Markdown resource backing this route.
    #[must_use]
    pub fn markdown(&self) -> Option<&'a str> {
        self.entry().markdown.as_deref()
    }

    /// Whether the route groups children in the sidebar.
    #[must_use]
    pub fn is_section(&self) -> bool {
        !self.table.children[self.idx].is_empty()
    }

    /// Child routes in display order.
    pub fn children(&self) -> impl Iterator<Item = Route<'a>> + use<'a> {
        let table = self.table;
        table.children[self.idx]
            .iter()
            .map(move |&idx| table.route(idx))
    }

    /// Parent route, `None` for top-level routes.
    #[must_use]
    pub fn parent(&self) -> Option<Route<'a>> {
        self.table.parents[self.idx].map(|idx| self.table.route(idx))
    }

    /// Ancestor routes, root first, excluding this route.
    #[must_use]
    pub fn ancestors(&self) -> Vec<Route<'a>> {
        let mut ancestors = Vec::new();
        let mut current = self.parent();
        while let Some(route) = current {
            ancestors.push(route);
            current = route.parent();
        }
        ancestors.reverse();
        ancestors
    }

    /// Breadcrumbs from the top-level ancestor down to the parent.
    #[must_use]
    pub fn breadcrumbs(&self) -> Vec<BreadcrumbItem> {
        self.ancestors()
            .into_iter()
            .map(|route| BreadcrumbItem {
                title: route.name().to_owned(),
                path: route.path().to_owned(),
            })
            .collect()
    }

    /// Link to this route.
    #[must_use]
    pub fn link(&self) -> NavLink {
        NavLink {
            name: self.name().to_owned(),
            path: self.path().to_owned(),
        }
    }

    /// Derive previous/next links.
    #[must_use]
    pub fn pager(&self, mode: PagerMode) -> Pager {
        let (previous, next) = match mode {
            PagerMode::ReadingOrder => self.reading_order_neighbours(),
            PagerMode::Siblings => self.sibling_neighbours(),
        };
        Pager {
            previous: previous.map(|idx| self.table.route(idx).link()),
            next: next.map(|idx| self.table.route(idx).link()),
        }
    }

    fn reading_order_neighbours(&self) -> (Option<usize>, Option<usize>) {
        let order = &self.table.reading_order;
        // Routes before `idx` in reading order all have smaller indices.
        let before = order.partition_point(|&i| i < self.idx);
        let after = order.partition_point(|&i| i <= self.idx);
        let previous = before.checked_sub(1).map(|pos| order[pos]);
        let next = order.get(after).copied();
        (previous, next)
    }

    fn sibling_neighbours(&self) -> (Option<usize>, Option<usize>) {
        let siblings = match self.table.parents[self.idx] {
            Some(parent) => &self.table.children[parent],
            None => &self.table.roots,
        };
        let Some(pos) = siblings.iter().position(|&i| i == self.idx) else {
            return (None, None);
        };
        let previous = pos.checked_sub(1).map(|p| siblings[p]);
        let next = siblings.get(pos + 1).copied();
        (previous, next)
    }
}

/// Builder for constructing [`RouteTable`] instances.
#[derive(Default)]
struct RouteTableBuilder {
    entries: Vec<RouteEntry>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
    path_index: HashMap<String, usize>,
}

impl RouteTableBuilder {
    /// Add a node and its subtree in pre-order.
    fn add_node(&mut self, node: RouteNode, parent: Option<usize>) -> Result<(), RouteTableError> {
        if !node.path.starts_with('/') {
            return Err(RouteTableError::InvalidPath(node.path));
        }
        let path = normalize_path(&node.path);
        if node.name.trim().is_empty() {
            return Err(RouteTableError::EmptyName(path));
        }
        if self.path_index.contains_key(&path) {
            return Err(RouteTableError::DuplicatePath(path));
        }

        let idx = self.entries.len();
        self.path_index.insert(path.clone(), idx);
        self.entries.push(RouteEntry {
            name: node.name,
            path,
            markdown: node.markdown,
        });
        self.children.push(Vec::new());
        self.parents.push(parent);

        match parent {
            Some(parent) => self.children[parent].push(idx),
            None => self.roots.push(idx),
        }

        for child in node.children {
            self.add_node(child, Some(idx))?;
        }

        Ok(())
    }

    fn build(self) -> RouteTable {
        let reading_order = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.markdown.is_some())
            .map(|(idx, _)| idx)
            .collect();

        RouteTable {
            entries: self.entries,
            children: self.children,
            parents: self.parents,
            roots: self.roots,
            path_index: self.path_index,
            reading_order,
            base_path: "/docs".to_owned(),
            default_section: None,
        }
    }
}
