//! Route table, navigation state and page assembly for docnav.
//!
//! This crate provides:
//! - [`RouteTable`]: immutable route hierarchy with O(1) path resolution
//! - [`compute_expansion_state`] / [`NavigationController`]: sidebar state
//!   derived from the active path
//! - [`extract_headings`]: the "on this page" outline
//! - [`Site`]: page assembly over a [`Storage`](docnav_storage::Storage)
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use docnav_site::{Site, SiteConfig};
//! use docnav_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("docs")));
//! let config = SiteConfig::default();
//! let site = Site::open(&config, storage)?;
//!
//! let view = site.page("/docs/core-component/log");
//! for heading in &view.headings {
//!     println!("{} {}", heading.level, heading.text);
//! }
//! # Ok(())
//! # }
//! ```

mod headings;
mod navigation;
mod render;
mod route_table;
mod routes_file;
mod site;

pub use headings::{Heading, anchor_id, extract_headings, slugify};
pub use navigation::{NavItem, NavigationController, NavigationState, compute_expansion_state};
pub use render::{RenderOptions, render_html};
pub use route_table::{
    BreadcrumbItem, NavLink, Pager, PagerMode, Route, RouteNode, RouteTable, RouteTableError,
    find_in_tree, is_path_prefix, normalize_path,
};
pub use routes_file::{RoutesFileError, load_routes, parse_routes};
pub use site::{
    ContentError, MissingContent, PageContent, PageView, RouteInfo, Site, SiteConfig, SiteError,
};
