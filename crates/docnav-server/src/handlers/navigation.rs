//! Navigation API endpoint.
//!
//! Returns the sidebar state for an active path.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use docnav_site::NavigationState;
use serde::Deserialize;

use crate::state::AppState;

/// Query parameters for GET /api/navigation.
#[derive(Debug, Deserialize)]
pub(crate) struct NavigationQuery {
    /// Active path. Defaults to the site's base path.
    path: Option<String>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NavigationQuery>,
) -> Json<NavigationState> {
    let path = query
        .path
        .unwrap_or_else(|| state.site.table().base_path().to_owned());
    Json(state.site.navigation(&path))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    use crate::app::tests::get_json;

    #[tokio::test]
    async fn test_get_navigation_for_nested_path() {
        let (status, json) = get_json("/api/navigation?path=/docs/core-component/log/config").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["activePath"], "/docs/core-component/log/config");
        assert_eq!(
            json["expanded"],
            serde_json::json!(["/docs/core-component", "/docs/core-component/log"])
        );
        assert_eq!(json["items"][0]["expanded"], true);
        assert_eq!(json["items"][0]["children"][0]["children"][0]["active"], true);
    }

    #[tokio::test]
    async fn test_get_navigation_defaults_to_base_path() {
        let (status, json) = get_json("/api/navigation").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["activePath"], "/docs");
        // Nothing matches: first top-level section is expanded.
        assert_eq!(json["expanded"], serde_json::json!(["/docs/core-component"]));
    }
}
