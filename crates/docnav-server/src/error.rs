//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docnav_site::NavigationState;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// No route for the requested path. Carries the sidebar state so the
    /// client can still render navigation.
    #[error("Route not found: {path}")]
    RouteNotFound {
        path: String,
        navigation: Box<NavigationState>,
    },
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::RouteNotFound { path, navigation } => (
                StatusCode::NOT_FOUND,
                json!({"error": "Route not found", "path": path, "navigation": navigation}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
