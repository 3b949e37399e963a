//! Route definitions for the `/comments` resource.

use axum::routing::delete;
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(comment::delete))
}
