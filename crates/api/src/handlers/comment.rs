//! Handlers for task comments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kanban_core::types::DbId;
use kanban_db::models::comment::{Comment, CreateComment};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/tasks/{id}/comments
pub async fn list_by_task(
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<Vec<Comment>>> {
    let comments = state.service.list_comments(&task_id).await?;
    Ok(Json(comments))
}

/// POST /api/v1/tasks/{id}/comments
pub async fn create(
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    let comment = state.service.add_comment(&task_id, input).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/v1/comments/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.service.delete_comment(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
