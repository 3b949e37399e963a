//! Route definitions for the `/labels` resource.

use axum::routing::patch;
use axum::Router;

use crate::handlers::label;
use crate::state::AppState;

/// Routes mounted at `/labels`.
///
/// ```text
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", patch(label::update).delete(label::delete))
}
