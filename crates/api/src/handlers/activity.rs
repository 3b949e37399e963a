use axum::extract::{Query, State};
use axum::Json;
use kanban_db::models::activity::{ActivityLog, ActivityQuery};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/activity?task_id=&project_id=&limit=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<Vec<ActivityLog>>> {
    let entries = state.service.list_activity(&query).await?;
    Ok(Json(entries))
}
