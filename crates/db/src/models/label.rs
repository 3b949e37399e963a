//! Label entity model and DTOs.

use kanban_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A label row from the `labels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Label {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
}

/// DTO for creating a label. The owning project comes from the route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLabel {
    /// Defaults to "Label" when blank or omitted.
    pub name: Option<String>,
    /// Defaults to `#6366f1`.
    pub color: Option<String>,
}

/// DTO for updating a label. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLabel {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Body for assigning a label to a task.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignLabel {
    pub label_id: DbId,
}
