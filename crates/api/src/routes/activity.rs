use axum::routing::get;
use axum::Router;

use crate::handlers::activity;
use crate::state::AppState;

/// ```text
/// GET /activity    -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/activity", get(activity::list))
}
