//! Repository for the append-only `activity_log` table.

use chrono::Utc;
use kanban_core::activity::STATUS_CHANGED;
use kanban_core::types::new_id;
use sqlx::SqliteExecutor;

use crate::models::activity::{ActivityLog, NewActivity};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, task_id, project_id, action, details, actor, created_at";

/// Provides insert and query operations for activity entries.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Append an activity entry.
    pub async fn insert<'e, E>(
        executor: E,
        input: &NewActivity<'_>,
    ) -> Result<ActivityLog, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO activity_log (id, task_id, project_id, action, details, actor, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(new_id())
            .bind(input.task_id)
            .bind(input.project_id)
            .bind(input.action)
            .bind(&input.details)
            .bind(input.actor)
            .bind(Utc::now())
            .fetch_one(executor)
            .await
    }

    /// Entries for one task, newest first.
    pub async fn list_for_task(
        pool: &DbPool,
        task_id: &str,
        limit: i64,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_log
             WHERE task_id = ?1
             ORDER BY created_at DESC, id DESC
             LIMIT ?2"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(task_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Entries for one project, newest first. Includes deletion records
    /// whose task no longer exists.
    pub async fn list_for_project(
        pool: &DbPool,
        project_id: &str,
        limit: i64,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_log
             WHERE project_id = ?1
             ORDER BY created_at DESC, id DESC
             LIMIT ?2"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(project_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Entries across every project, newest first.
    pub async fn list_recent(pool: &DbPool, limit: i64) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_log
             ORDER BY created_at DESC, id DESC
             LIMIT ?1"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Most recent transitions into `done`, optionally within one project.
    pub async fn recent_completions(
        pool: &DbPool,
        project_id: Option<&str>,
        limit: i64,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_log
             WHERE action = ?1
               AND json_extract(details, '$.to') = 'done'
               AND (?2 IS NULL OR project_id = ?2)
             ORDER BY created_at DESC, id DESC
             LIMIT ?3"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(STATUS_CHANGED)
            .bind(project_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
