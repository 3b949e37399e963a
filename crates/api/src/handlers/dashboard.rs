//! Handlers for the dashboard summary and analytics views.

use axum::extract::{Query, State};
use axum::Json;
use kanban_db::models::dashboard::{Analytics, DashboardSummary};

use crate::error::AppResult;
use crate::query::ProjectScopeParams;
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<DashboardSummary>> {
    let summary = state.service.dashboard_summary().await?;
    Ok(Json(summary))
}

/// GET /api/v1/analytics?project_id=
pub async fn analytics(
    State(state): State<AppState>,
    Query(params): Query<ProjectScopeParams>,
) -> AppResult<Json<Analytics>> {
    let analytics = state.service.analytics(params.project_id.as_deref()).await?;
    Ok(Json(analytics))
}
