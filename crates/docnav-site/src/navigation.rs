//! Sidebar navigation state.
//!
//! Which sections are expanded is a pure function of the active path and
//! the route table. There are no per-section flags to keep in sync and no
//! history: navigating to a path always yields the same state.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use crate::route_table::{Route, RouteTable, is_path_prefix, normalize_path};

/// Compute the set of expanded section paths for an active path.
///
/// A section is expanded when the active path is the section's path or lies
/// below it (segment-aware), or when the section is a tree ancestor of the
/// route the active path resolves to. If nothing matches, only the table's
/// default section is expanded.
///
/// # Examples
///
/// ```
/// use docnav_site::{RouteNode, RouteTable, compute_expansion_state};
///
/// let table = RouteTable::from_nodes(vec![
///     RouteNode::new("Core", "/docs/core").with_children(vec![
///         RouteNode::page("Log", "/docs/core/log", "log.md"),
///     ]),
/// ])
/// .unwrap();
///
/// let expanded = compute_expansion_state("/docs/core/log", &table);
/// assert!(expanded.contains("/docs/core"));
/// ```
#[must_use]
pub fn compute_expansion_state(active_path: &str, table: &RouteTable) -> BTreeSet<String> {
    let active = normalize_path(active_path);

    let mut expanded: BTreeSet<String> = table
        .sections()
        .filter(|section| is_path_prefix(section.path(), &active))
        .map(|section| section.path().to_owned())
        .collect();

    if let Some(route) = table.resolve(&active) {
        expanded.extend(
            route
                .ancestors()
                .into_iter()
                .map(|ancestor| ancestor.path().to_owned()),
        );
        if route.is_section() {
            expanded.insert(route.path().to_owned());
        }
    }

    if expanded.is_empty()
        && let Some(section) = table.default_section()
    {
        expanded.insert(section.path().to_owned());
    }

    expanded
}

impl RouteTable {
    /// Expanded section paths for `active_path`.
    ///
    /// See [`compute_expansion_state`].
    #[must_use]
    pub fn expansion_state(&self, active_path: &str) -> BTreeSet<String> {
        compute_expansion_state(active_path, self)
    }
}

/// Sidebar navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Link target path.
    pub path: String,
    /// Whether this item is the active route.
    pub active: bool,
    /// Whether this section is expanded. Always `false` for leaves.
    pub expanded: bool,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Sidebar state for one view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    /// Normalized active path.
    pub active_path: String,
    /// Expanded section paths.
    pub expanded: BTreeSet<String>,
    /// Sidebar tree.
    pub items: Vec<NavItem>,
}

impl NavigationState {
    /// Whether the section at `path` is expanded.
    #[must_use]
    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }
}

/// Computes [`NavigationState`] for a shared route table.
#[derive(Clone, Debug)]
pub struct NavigationController {
    table: Arc<RouteTable>,
}

impl NavigationController {
    /// Create a controller for `table`.
    #[must_use]
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self { table }
    }

    /// Expanded section paths for `active_path`.
    #[must_use]
    pub fn expansion_state(&self, active_path: &str) -> BTreeSet<String> {
        compute_expansion_state(active_path, &self.table)
    }

    /// Full sidebar state for `active_path`.
    #[must_use]
    pub fn navigation(&self, active_path: &str) -> NavigationState {
        let active_path = normalize_path(active_path);
        let expanded = compute_expansion_state(&active_path, &self.table);
        let items = self
            .table
            .roots()
            .map(|route| build_nav_item(route, &active_path, &expanded))
            .collect();

        NavigationState {
            active_path,
            expanded,
            items,
        }
    }
}

fn build_nav_item(route: Route<'_>, active_path: &str, expanded: &BTreeSet<String>) -> NavItem {
    let children = route
        .children()
        .map(|child| build_nav_item(child, active_path, expanded))
        .collect();

    NavItem {
        title: route.name().to_owned(),
        path: route.path().to_owned(),
        active: route.path() == active_path,
        expanded: route.is_section() && expanded.contains(route.path()),
        children,
    }
}
