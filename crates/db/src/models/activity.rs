//! Activity log entity model and DTOs.
//!
//! Activity rows are immutable once created (no `updated_at`).

use kanban_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single activity log entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLog {
    pub id: DbId,
    pub task_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub action: String,
    /// JSON payload; its shape depends on `action`.
    pub details: Option<String>,
    pub actor: Option<String>,
    pub created_at: Timestamp,
}

/// Values for inserting an activity entry.
#[derive(Debug, Clone)]
pub struct NewActivity<'a> {
    pub task_id: Option<&'a str>,
    pub project_id: Option<&'a str>,
    pub action: &'a str,
    pub details: String,
    pub actor: &'a str,
}

/// Filter for listing activity. `task_id` wins over `project_id`; with
/// neither, the feed spans all projects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityQuery {
    pub task_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub limit: Option<i64>,
}
