//! Repository for the `tasks` table and task read models.

use std::collections::HashMap;

use chrono::Utc;
use kanban_core::task::TaskStatus;
use kanban_core::types::new_id;
use sqlx::SqliteExecutor;

use crate::models::task::{
    ExportTaskRow, NewTask, Task, TaskFilter, TaskLabel, TaskWithLabels, UpdateTask,
};
use crate::repositories::PositionAllocator;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, parent_task_id, title, description, status, priority, \
                       assignee, due_date, position, created_at, updated_at";

/// Display order within a column: rank first, newest first on ties.
const COLUMN_ORDER: &str = "position ASC, created_at DESC";

/// Provides CRUD operations and enrichment for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task at the end of its `(project_id, status)` column.
    ///
    /// The rank is computed inside the INSERT so concurrent appenders to the
    /// same column cannot observe the same maximum.
    pub async fn create<'e, E>(executor: E, input: &NewTask) -> Result<Task, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let position = PositionAllocator::append_subquery("?2", "?6", None);
        let query = format!(
            "INSERT INTO tasks (id, project_id, parent_task_id, title, description, status,
                                priority, assignee, due_date, position, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, {position}, ?10, ?10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(new_id())
            .bind(&input.project_id)
            .bind(&input.parent_task_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.priority.as_str())
            .bind(&input.assignee)
            .bind(&input.due_date)
            .bind(Utc::now())
            .fetch_one(executor)
            .await
    }

    /// Find a task by its ID.
    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<Task>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = ?1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List a project's tasks in column display order, optionally filtered.
    pub async fn list_by_project(
        pool: &DbPool,
        project_id: &str,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE project_id = ?1
               AND (?2 IS NULL OR status = ?2)
               AND (?3 IS NULL OR priority = ?3)
             ORDER BY {COLUMN_ORDER}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(filter.status.map(TaskStatus::as_str))
            .bind(filter.priority.map(|p| p.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive title search. `pattern` is a ready-made `LIKE`
    /// pattern using `\` as its escape character.
    pub async fn search(
        pool: &DbPool,
        pattern: &str,
        project_id: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE title LIKE ?1 ESCAPE '\\'
               AND (?2 IS NULL OR project_id = ?2)
             ORDER BY updated_at DESC
             LIMIT ?3"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(pattern)
            .bind(project_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update in a single statement.
    ///
    /// When `status` is present and differs from the stored value, the task
    /// is re-ranked at the end of the destination column in the same
    /// statement. Returns `None` if no row with the given `id` exists.
    pub async fn update<'e, E>(
        executor: E,
        id: &str,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let append = PositionAllocator::append_subquery("tasks.project_id", "?10", None);
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE(?2, title),
                description = CASE WHEN ?3 THEN ?4 ELSE description END,
                priority = COALESCE(?5, priority),
                assignee = CASE WHEN ?6 THEN ?7 ELSE assignee END,
                due_date = CASE WHEN ?8 THEN ?9 ELSE due_date END,
                position = CASE WHEN ?10 IS NOT NULL AND ?10 <> status
                                THEN {append} ELSE position END,
                status = COALESCE(?10, status),
                updated_at = ?11
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(input.priority.map(|p| p.as_str()))
            .bind(input.assignee.is_some())
            .bind(input.assignee.clone().flatten())
            .bind(input.due_date.is_some())
            .bind(input.due_date.clone().flatten())
            .bind(input.status.map(TaskStatus::as_str))
            .bind(Utc::now())
            .fetch_optional(executor)
            .await
    }

    /// Move a task to the end of `status` in its project.
    ///
    /// The task itself is excluded from the max, so re-appending the last
    /// task of a column keeps its rank.
    pub async fn append_to<'e, E>(
        executor: E,
        id: &str,
        status: TaskStatus,
    ) -> Result<Option<Task>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let append = PositionAllocator::append_subquery("tasks.project_id", "?2", Some("tasks.id"));
        let query = format!(
            "UPDATE tasks SET
                position = {append},
                status = ?2,
                updated_at = ?3
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(Utc::now())
            .fetch_optional(executor)
            .await
    }

    /// Place a task at an explicit rank. Callers open the slot first with
    /// [`PositionAllocator::shift_from`] inside the same transaction.
    pub async fn place_at<'e, E>(
        executor: E,
        id: &str,
        status: TaskStatus,
        position: i64,
    ) -> Result<Option<Task>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "UPDATE tasks SET status = ?2, position = ?3, updated_at = ?4
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(position)
            .bind(Utc::now())
            .fetch_optional(executor)
            .await
    }

    /// Delete a task; comments, label links and activity rows that reference
    /// it cascade. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of tasks owned by a project.
    pub async fn count_by_project(pool: &DbPool, project_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks WHERE project_id = ?1")
            .bind(project_id)
            .fetch_one(pool)
            .await
    }

    /// Total number of tasks.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await
    }

    /// Join tasks with their labels, subtask progress and comment counts.
    ///
    /// Runs three batched queries regardless of how many tasks are passed and
    /// preserves the input order.
    pub async fn enrich(
        pool: &DbPool,
        tasks: Vec<Task>,
    ) -> Result<Vec<TaskWithLabels>, sqlx::Error> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let ids = serde_json::Value::from(
            tasks.iter().map(|t| t.id.clone()).collect::<Vec<_>>(),
        )
        .to_string();

        let label_rows = sqlx::query_as::<_, (String, String, String, String)>(
            "SELECT tl.task_id, l.id, l.name, l.color
             FROM task_labels tl
             JOIN labels l ON l.id = tl.label_id
             WHERE tl.task_id IN (SELECT value FROM json_each(?1))
             ORDER BY l.name ASC",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await?;

        let subtask_rows = sqlx::query_as::<_, (String, i64, i64)>(
            "SELECT parent_task_id,
                    COUNT(*),
                    COALESCE(SUM(CASE WHEN status = 'done' THEN 1 ELSE 0 END), 0)
             FROM tasks
             WHERE parent_task_id IN (SELECT value FROM json_each(?1))
             GROUP BY parent_task_id",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await?;

        let comment_rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT task_id, COUNT(*)
             FROM comments
             WHERE task_id IN (SELECT value FROM json_each(?1))
             GROUP BY task_id",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await?;

        let mut labels: HashMap<String, Vec<TaskLabel>> = HashMap::new();
        for (task_id, id, name, color) in label_rows {
            labels
                .entry(task_id)
                .or_default()
                .push(TaskLabel { id, name, color });
        }
        let subtasks: HashMap<String, (i64, i64)> = subtask_rows
            .into_iter()
            .map(|(parent, total, done)| (parent, (total, done)))
            .collect();
        let comments: HashMap<String, i64> = comment_rows.into_iter().collect();

        Ok(tasks
            .into_iter()
            .map(|task| {
                let (subtask_count, subtask_done_count) =
                    subtasks.get(&task.id).copied().unwrap_or((0, 0));
                TaskWithLabels {
                    labels: labels.remove(&task.id).unwrap_or_default(),
                    comment_count: comments.get(&task.id).copied().unwrap_or(0),
                    subtask_count,
                    subtask_done_count,
                    task,
                }
            })
            .collect())
    }

    /// Rows for CSV export. A project filter keeps column order; without one,
    /// every task is returned oldest first.
    pub async fn export_rows(
        pool: &DbPool,
        project_id: Option<&str>,
    ) -> Result<Vec<ExportTaskRow>, sqlx::Error> {
        const SELECT: &str = "SELECT t.id, p.name AS project_name, t.title, t.description,
                                     t.status, t.priority, t.assignee, t.due_date,
                                     t.created_at, t.updated_at
                              FROM tasks t
                              LEFT JOIN projects p ON p.id = t.project_id";
        match project_id {
            Some(project_id) => {
                let query = format!("{SELECT} WHERE t.project_id = ?1 ORDER BY t.position ASC");
                sqlx::query_as::<_, ExportTaskRow>(&query)
                    .bind(project_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("{SELECT} ORDER BY t.created_at ASC");
                sqlx::query_as::<_, ExportTaskRow>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}
