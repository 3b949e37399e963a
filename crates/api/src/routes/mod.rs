pub mod activity;
pub mod comment;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod label;
pub mod project;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                        list, create
///   /{id}                          get, update, delete
///   /{id}/labels                   list, create labels
///
/// /labels/{id}                     update, delete
///
/// /tasks                           list, create
///   /search                        title search
///   /reorder                       move between or within columns
///   /{id}                          get, update, delete
///   /{id}/labels                   assign
///   /{id}/labels/{label_id}        unassign
///   /{id}/comments                 list, add
///
/// /comments/{id}                   delete
///
/// /activity                        activity feed
/// /dashboard                       board-wide summary
/// /analytics                       trends
/// /export                          CSV download
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/labels", label::router())
        .nest("/tasks", task::router())
        .nest("/comments", comment::router())
        .merge(activity::router())
        .merge(dashboard::router())
        .merge(export::router())
}
