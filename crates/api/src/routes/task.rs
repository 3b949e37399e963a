//! Route definitions for the `/tasks` resource.
//!
//! Static segments (`/search`, `/reorder`) are registered alongside `/{id}`;
//! axum prefers the static match.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{comment, label, task};
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /search                    -> search
/// POST   /reorder                   -> reorder
/// GET    /{id}                      -> get_by_id
/// PATCH  /{id}                      -> update
/// DELETE /{id}                      -> delete
///
/// POST   /{id}/labels               -> assign
/// DELETE /{id}/labels/{label_id}    -> unassign
///
/// GET    /{id}/comments             -> list_by_task
/// POST   /{id}/comments             -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route("/search", get(task::search))
        .route("/reorder", post(task::reorder))
        .route(
            "/{id}",
            get(task::get_by_id).patch(task::update).delete(task::delete),
        )
        .route("/{id}/labels", post(label::assign))
        .route("/{id}/labels/{label_id}", delete(label::unassign))
        .route(
            "/{id}/comments",
            get(comment::list_by_task).post(comment::create),
        )
}
