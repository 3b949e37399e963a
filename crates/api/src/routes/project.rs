//! Route definitions for the `/projects` resource.
//!
//! Also nests project-scoped label routes under `/projects/{id}/labels`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{label, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PATCH  /{id}             -> update
/// DELETE /{id}             -> delete
///
/// GET    /{id}/labels      -> list_by_project
/// POST   /{id}/labels      -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .patch(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/labels",
            get(label::list_by_project).post(label::create),
        )
}
