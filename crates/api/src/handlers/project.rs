//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kanban_core::types::DbId;
use kanban_db::models::project::{CreateProject, Project, ProjectWithTaskCount, UpdateProject};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = state.service.create_project(input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProjectWithTaskCount>>> {
    let projects = state.service.list_projects().await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = state.service.get_project(&id).await?;
    Ok(Json(project))
}

/// PATCH /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = state.service.update_project(&id, input).await?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Cascades to the project's tasks, labels and activity.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.service.delete_project(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
