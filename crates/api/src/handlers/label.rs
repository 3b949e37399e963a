//! Handlers for labels and task-label assignment.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kanban_core::types::DbId;
use kanban_db::models::label::{AssignLabel, CreateLabel, Label, UpdateLabel};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/labels
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Label>>> {
    let labels = state.service.list_labels(&project_id).await?;
    Ok(Json(labels))
}

/// POST /api/v1/projects/{id}/labels
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateLabel>,
) -> AppResult<(StatusCode, Json<Label>)> {
    let label = state.service.create_label(&project_id, input).await?;
    Ok((StatusCode::CREATED, Json(label)))
}

/// PATCH /api/v1/labels/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLabel>,
) -> AppResult<Json<Label>> {
    let label = state.service.update_label(&id, input).await?;
    Ok(Json(label))
}

/// DELETE /api/v1/labels/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.service.delete_label(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/tasks/{id}/labels
///
/// Assigning a label the task already carries is a no-op.
pub async fn assign(
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    Json(input): Json<AssignLabel>,
) -> AppResult<StatusCode> {
    state.service.assign_label(&task_id, &input.label_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/tasks/{id}/labels/{label_id}
pub async fn unassign(
    State(state): State<AppState>,
    Path((task_id, label_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    state.service.unassign_label(&task_id, &label_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
