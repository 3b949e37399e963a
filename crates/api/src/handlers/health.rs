//! Liveness and store readiness.

use axum::extract::State;
use axum::Json;
use kanban_db::StoreStatus;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok` when the store is reachable and fully migrated, else `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    /// `None` when the store could not be queried.
    pub store: Option<StoreStatus>,
}

/// GET /health
///
/// Always 200; readiness is in the body.
pub async fn report(State(state): State<AppState>) -> Json<HealthReport> {
    let store = match kanban_db::store_status(&state.pool).await {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(error = %e, "Store status unavailable");
            None
        }
    };
    let ready = store.as_ref().is_some_and(|s| s.pending_migrations == 0);

    Json(HealthReport {
        status: if ready { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        store,
    })
}
