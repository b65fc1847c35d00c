//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use docnav_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Route table and content loader.
    pub(crate) site: Arc<Site>,
}
