//! Routes API endpoint.
//!
//! Lists every route of the table in depth-first order.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use docnav_site::RouteInfo;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/routes.
#[derive(Serialize)]
pub(crate) struct RoutesResponse {
    /// Routes in depth-first order.
    routes: Vec<RouteInfo>,
}

/// Handle GET /api/routes.
pub(crate) async fn get_routes(State(state): State<Arc<AppState>>) -> Json<RoutesResponse> {
    let routes = state.site.table().flatten().map(RouteInfo::from).collect();
    Json(RoutesResponse { routes })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    use crate::app::tests::get_json;

    #[tokio::test]
    async fn test_get_routes_depth_first() {
        let (status, json) = get_json("/api/routes").await;

        assert_eq!(status, StatusCode::OK);
        let paths: Vec<_> = json["routes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["path"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(
            paths,
            vec![
                "/docs/core-component",
                "/docs/core-component/log",
                "/docs/core-component/log/config",
                "/docs/faq",
            ]
        );
        assert_eq!(json["routes"][0]["isSection"], true);
    }
}
