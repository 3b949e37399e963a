use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use kanban_core::export::export_filename;

use crate::error::AppResult;
use crate::query::ProjectScopeParams;
use crate::state::AppState;

/// GET /api/v1/export?project_id=
///
/// Downloads every task (or one project's tasks) as CSV.
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<ProjectScopeParams>,
) -> AppResult<impl IntoResponse> {
    let csv = state.service.export_csv(params.project_id.as_deref()).await?;
    let filename = export_filename(chrono::Utc::now().date_naive());

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}
