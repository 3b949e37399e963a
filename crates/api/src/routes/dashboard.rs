//! Route definitions for the read-only board views.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// ```text
/// GET /dashboard    -> summary
/// GET /analytics    -> analytics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::summary))
        .route("/analytics", get(dashboard::analytics))
}
