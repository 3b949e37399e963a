//! Repository for the `comments` table.

use chrono::Utc;
use kanban_core::types::new_id;

use crate::models::comment::Comment;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, task_id, content, author, created_at, updated_at";

/// Provides CRUD operations for task comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment on a task.
    pub async fn create(
        pool: &DbPool,
        task_id: &str,
        content: &str,
        author: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (id, task_id, content, author, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(new_id())
            .bind(task_id)
            .bind(content)
            .bind(author)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a comment by its ID.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = ?1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Comments on a task, newest first.
    pub async fn list_by_task(pool: &DbPool, task_id: &str) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments WHERE task_id = ?1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a comment. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
