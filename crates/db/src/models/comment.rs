//! Comment entity model and DTOs.

use kanban_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A comment row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub task_id: DbId,
    pub content: String,
    pub author: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a comment. The task comes from the route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateComment {
    pub content: String,
    /// Defaults to the acting client ("user" or "mcp-agent").
    pub author: Option<String>,
}
