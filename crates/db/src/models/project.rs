//! Project entity model and DTOs.

use kanban_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::double_option;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub repo_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project with the number of tasks it owns, as shown in listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectWithTaskCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,
    pub task_count: i64,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProject {
    /// Defaults to "Untitled Project" when blank or omitted.
    pub name: Option<String>,
    pub description: Option<String>,
    pub repo_url: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
///
/// `repo_url` distinguishes an omitted key from an explicit `null`, which
/// clears the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub repo_url: Option<Option<String>>,
}
