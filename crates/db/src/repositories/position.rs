//! Rank allocation within a `(project_id, status)` column.
//!
//! Ranks are dense when appended and may develop gaps after deletes or
//! cross-column moves; only their relative order matters. Every write path
//! that needs a rank goes through this module:
//!
//! - appends embed [`PositionAllocator::append_subquery`] in the INSERT or
//!   UPDATE that consumes the value, so max-then-write is one statement;
//! - explicit reorders call [`PositionAllocator::shift_from`] and then set the
//!   moved task's rank inside the same transaction.

use kanban_core::task::TaskStatus;
use sqlx::SqliteExecutor;

/// Provides rank queries and updates for task columns.
pub struct PositionAllocator;

impl PositionAllocator {
    /// SQL expression yielding the append rank for a column.
    ///
    /// `project` and `status` are SQL expressions (usually numbered bind
    /// parameters such as `?2`). When `exclude_id` is given, that task is left
    /// out of the max so re-appending the last task keeps its rank.
    pub fn append_subquery(project: &str, status: &str, exclude_id: Option<&str>) -> String {
        let exclude = exclude_id
            .map(|id| format!(" AND col.id <> {id}"))
            .unwrap_or_default();
        format!(
            "(SELECT COALESCE(MAX(col.position), -1) + 1 FROM tasks col \
             WHERE col.project_id = {project} AND col.status = {status}{exclude})"
        )
    }

    /// `1 + max(position)` in the column, or `0` when it is empty.
    ///
    /// `exclude_id` leaves one task out of the max. Appends use
    /// [`Self::append_subquery`] instead so the value cannot go stale between
    /// read and write; reorders read it under the column lock.
    pub async fn next_position<'e, E>(
        executor: E,
        project_id: &str,
        status: TaskStatus,
        exclude_id: Option<&str>,
    ) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let exclude = exclude_id.map(|_| "?3");
        let sql = format!("SELECT {}", Self::append_subquery("?1", "?2", exclude));
        let mut query = sqlx::query_scalar::<_, i64>(&sql)
            .bind(project_id)
            .bind(status.as_str());
        if let Some(id) = exclude_id {
            query = query.bind(id);
        }
        query.fetch_one(executor).await
    }

    /// Shift every task at rank `>= from` in the column one place right,
    /// opening a slot at `from`. Returns the number of tasks shifted.
    pub async fn shift_from<'e, E>(
        executor: E,
        project_id: &str,
        status: TaskStatus,
        from: i64,
    ) -> Result<u64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE tasks SET position = position + 1 \
             WHERE project_id = ?1 AND status = ?2 AND position >= ?3",
        )
        .bind(project_id)
        .bind(status.as_str())
        .bind(from)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Ranks of a column in display order, as `(task_id, position)` pairs.
    pub async fn column<'e, E>(
        executor: E,
        project_id: &str,
        status: TaskStatus,
    ) -> Result<Vec<(String, i64)>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT id, position FROM tasks \
             WHERE project_id = ?1 AND status = ?2 \
             ORDER BY position ASC, created_at DESC",
        )
        .bind(project_id)
        .bind(status.as_str())
        .fetch_all(executor)
        .await
    }
}
