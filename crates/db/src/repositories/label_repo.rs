//! Repository for the `labels` and `task_labels` tables.

use chrono::Utc;
use kanban_core::types::new_id;

use crate::models::label::{Label, UpdateLabel};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, color, created_at";

/// Provides CRUD operations for labels and their task assignments.
pub struct LabelRepo;

impl LabelRepo {
    /// Insert a label with already-resolved name and color.
    pub async fn create(
        pool: &DbPool,
        project_id: &str,
        name: &str,
        color: &str,
    ) -> Result<Label, sqlx::Error> {
        let query = format!(
            "INSERT INTO labels (id, project_id, name, color, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Label>(&query)
            .bind(new_id())
            .bind(project_id)
            .bind(name)
            .bind(color)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a label by its ID.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Label>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM labels WHERE id = ?1");
        sqlx::query_as::<_, Label>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's labels by name.
    pub async fn list_by_project(
        pool: &DbPool,
        project_id: &str,
    ) -> Result<Vec<Label>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM labels WHERE project_id = ?1 ORDER BY name ASC, created_at ASC"
        );
        sqlx::query_as::<_, Label>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a label. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: &str,
        input: &UpdateLabel,
    ) -> Result<Option<Label>, sqlx::Error> {
        let query = format!(
            "UPDATE labels SET
                name = COALESCE(?2, name),
                color = COALESCE(?3, color)
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Label>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a label; its task assignments cascade.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM labels WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Link a label to a task. Assigning twice is a no-op; returns `true`
    /// only when a new link was created.
    pub async fn assign(pool: &DbPool, task_id: &str, label_id: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("INSERT OR IGNORE INTO task_labels (task_id, label_id) VALUES (?1, ?2)")
                .bind(task_id)
                .bind(label_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a label from a task. Returns `true` if a link was removed.
    pub async fn unassign(
        pool: &DbPool,
        task_id: &str,
        label_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_labels WHERE task_id = ?1 AND label_id = ?2")
            .bind(task_id)
            .bind(label_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
