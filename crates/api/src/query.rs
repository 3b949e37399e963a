//! Shared query parameter types for API handlers.

use kanban_core::task::{TaskPriority, TaskStatus};
use kanban_core::types::DbId;
use kanban_db::models::task::TaskFilter;
use serde::Deserialize;

/// `?project_id=` for views that can be scoped to one project.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectScopeParams {
    pub project_id: Option<DbId>,
}

/// `?project_id=&status=&priority=` for listing tasks.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListParams {
    pub project_id: Option<DbId>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskListParams {
    pub fn filter(&self) -> TaskFilter {
        TaskFilter {
            status: self.status,
            priority: self.priority,
        }
    }
}

/// `?q=&project_id=` for title search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub project_id: Option<DbId>,
}
