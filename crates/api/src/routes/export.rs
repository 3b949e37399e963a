use axum::routing::get;
use axum::Router;

use crate::handlers::export;
use crate::state::AppState;

/// ```text
/// GET /export    -> export_csv
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/export", get(export::export_csv))
}
