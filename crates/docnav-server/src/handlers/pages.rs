//! Pages API endpoint.
//!
//! Assembles a page view and returns JSON with metadata, breadcrumbs, the
//! heading outline, pager links, rendered HTML and sidebar state.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docnav_site::{
    BreadcrumbItem, ContentError, Heading, NavigationState, PageContent, PageView, Pager,
    RouteInfo, anchor_id,
};
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::to_url_path;
use crate::state::AppState;

/// Response for GET /api/pages/{path}.
#[derive(Serialize)]
struct PageResponse {
    /// Page metadata.
    meta: PageMeta,
    /// Breadcrumb navigation items.
    breadcrumbs: Vec<BreadcrumbItem>,
    /// Table of contents entries.
    toc: Vec<TocResponse>,
    /// Previous/next links.
    pager: Pager,
    /// Rendered HTML content (empty without content).
    content: String,
    /// Why content is missing, if it failed to load.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ContentError>,
    /// Sidebar state.
    navigation: NavigationState,
}

/// Page metadata.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageMeta {
    /// Route title.
    title: String,
    /// URL path.
    path: String,
    /// Markdown resource backing the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    markdown_path: Option<String>,
    /// Whether the route has children.
    is_section: bool,
}

impl From<RouteInfo> for PageMeta {
    fn from(route: RouteInfo) -> Self {
        Self {
            title: route.title,
            path: route.path,
            markdown_path: route.markdown,
            is_section: route.is_section,
        }
    }
}

/// Table of contents entry for serialization.
#[derive(Serialize)]
struct TocResponse {
    /// Heading level (2 or 3).
    level: u8,
    /// Heading text.
    title: String,
    /// Anchor ID.
    id: String,
}

impl From<Heading> for TocResponse {
    fn from(heading: Heading) -> Self {
        Self {
            level: heading.level,
            id: anchor_id(&heading.slug).to_owned(),
            title: heading.text,
        }
    }
}

/// Handle GET /api/pages/ (root page).
pub(crate) async fn get_root_page(State(state): State<Arc<AppState>>) -> Result<Response, ServerError> {
    get_page_impl("", &state)
}

/// Handle GET /api/pages/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    get_page_impl(&path, &state)
}

/// Shared implementation for page assembly.
fn get_page_impl(path: &str, state: &AppState) -> Result<Response, ServerError> {
    let view = state.site.page(&to_url_path(path));
    let PageView {
        path,
        route,
        content,
        headings,
        breadcrumbs,
        pager,
        navigation,
    } = view;

    let Some(route) = route else {
        return Err(ServerError::RouteNotFound {
            path,
            navigation: Box::new(navigation),
        });
    };

    let (status, html, error) = match content {
        PageContent::Loaded { html } => (StatusCode::OK, html, None),
        PageContent::NoContent => (StatusCode::OK, String::new(), None),
        PageContent::Failed { error } => {
            let status = match error {
                ContentError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
                ContentError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            };
            (status, String::new(), Some(error))
        }
    };

    let response = PageResponse {
        meta: PageMeta::from(route),
        breadcrumbs,
        toc: headings.into_iter().map(TocResponse::from).collect(),
        pager,
        content: html,
        error,
        navigation,
    };

    Ok((status, Json(response)).into_response())
}
