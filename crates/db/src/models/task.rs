//! Task entity model and DTOs.

use kanban_core::export::ExportRow;
use kanban_core::task::{TaskPriority, TaskStatus};
use kanban_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::double_option;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub parent_task_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    #[sqlx(try_from = "String")]
    pub priority: TaskPriority,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub position: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The subset of a label shown on a task card.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TaskLabel {
    pub id: DbId,
    pub name: String,
    pub color: String,
}

/// A task joined with its labels, subtask progress and comment count.
#[derive(Debug, Clone, Serialize)]
pub struct TaskWithLabels {
    #[serde(flatten)]
    pub task: Task,
    pub labels: Vec<TaskLabel>,
    pub subtask_count: i64,
    pub subtask_done_count: i64,
    pub comment_count: i64,
}

impl TaskWithLabels {
    /// A freshly created task: no labels, subtasks or comments yet.
    pub fn bare(task: Task) -> Self {
        Self {
            task,
            labels: Vec::new(),
            subtask_count: 0,
            subtask_done_count: 0,
            comment_count: 0,
        }
    }
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTask {
    /// Required; kept optional so a missing value is reported as a
    /// validation error rather than a deserialization failure.
    pub project_id: Option<DbId>,
    pub parent_task_id: Option<DbId>,
    /// Defaults to "Untitled Task" when blank or omitted.
    pub title: Option<String>,
    pub description: Option<String>,
    /// Defaults to `backlog`.
    pub status: Option<TaskStatus>,
    /// Defaults to `medium`.
    pub priority: Option<TaskPriority>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
}

/// Fully resolved values for a task insert. The position is not included; it
/// is allocated by the insert statement itself.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub project_id: DbId,
    pub parent_task_id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
}

/// DTO for a partial task update. Absent fields are left untouched.
///
/// Nullable fields accept an explicit `null` to clear the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
}

/// DTO for moving a task between or within columns.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveTask {
    pub task_id: DbId,
    pub new_status: TaskStatus,
    /// Target index in the destination column. Omitted means "append".
    pub new_position: Option<i64>,
}

/// Optional filters for listing a project's tasks.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

/// A task joined with its project name for CSV export.
#[derive(Debug, Clone, FromRow)]
pub struct ExportTaskRow {
    pub id: DbId,
    pub project_name: Option<String>,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    #[sqlx(try_from = "String")]
    pub priority: TaskPriority,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ExportTaskRow> for ExportRow {
    fn from(row: ExportTaskRow) -> Self {
        ExportRow {
            id: row.id,
            project_name: row.project_name,
            title: row.title,
            description: row.description,
            status: row.status,
            priority: row.priority,
            assignee: row.assignee,
            due_date: row.due_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
