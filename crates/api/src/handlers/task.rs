//! Handlers for the `/tasks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kanban_core::types::DbId;
use kanban_db::models::task::{CreateTask, MoveTask, Task, TaskWithLabels, UpdateTask};

use crate::error::AppResult;
use crate::query::{SearchParams, TaskListParams};
use crate::state::AppState;

/// POST /api/v1/tasks
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<TaskWithLabels>)> {
    let task = state.service.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks?project_id=&status=&priority=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TaskListParams>,
) -> AppResult<Json<Vec<TaskWithLabels>>> {
    let tasks = state
        .service
        .list_tasks(params.project_id.as_deref(), params.filter())
        .await?;
    Ok(Json(tasks))
}

/// GET /api/v1/tasks/search?q=&project_id=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = state
        .service
        .search_tasks(&params.q, params.project_id.as_deref())
        .await?;
    Ok(Json(tasks))
}

/// POST /api/v1/tasks/reorder
pub async fn reorder(
    State(state): State<AppState>,
    Json(input): Json<MoveTask>,
) -> AppResult<Json<TaskWithLabels>> {
    let task = state.service.move_task(input).await?;
    Ok(Json(task))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskWithLabels>> {
    let task = state.service.get_task(&id).await?;
    Ok(Json(task))
}

/// PATCH /api/v1/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<TaskWithLabels>> {
    let task = state.service.update_task(&id, input).await?;
    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
///
/// Deleting an unknown task still answers 204.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.service.delete_task(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
