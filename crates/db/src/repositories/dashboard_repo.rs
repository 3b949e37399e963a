//! Read-only aggregate queries behind the dashboard and analytics views.
//!
//! Timestamps are stored as RFC 3339 text in UTC, so the calendar day of a
//! row is the first ten characters of its timestamp.

use kanban_core::activity::STATUS_CHANGED;

use crate::models::dashboard::{DailyCount, GroupCount, ProjectProgress, RecentActivity};
use crate::DbPool;

/// Provides aggregate queries over tasks and activity.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Task counts grouped by status. Empty statuses are absent.
    pub async fn status_counts(pool: &DbPool) -> Result<Vec<GroupCount>, sqlx::Error> {
        sqlx::query_as::<_, GroupCount>(
            "SELECT status AS key, COUNT(*) AS count FROM tasks GROUP BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Task counts grouped by priority. Empty priorities are absent.
    pub async fn priority_counts(pool: &DbPool) -> Result<Vec<GroupCount>, sqlx::Error> {
        sqlx::query_as::<_, GroupCount>(
            "SELECT priority AS key, COUNT(*) AS count FROM tasks GROUP BY priority",
        )
        .fetch_all(pool)
        .await
    }

    /// Latest activity joined with the current task title and project name.
    pub async fn recent_activity(
        pool: &DbPool,
        limit: i64,
    ) -> Result<Vec<RecentActivity>, sqlx::Error> {
        sqlx::query_as::<_, RecentActivity>(
            "SELECT a.id, a.action, a.details,
                    t.title AS task_title,
                    p.name AS project_name,
                    a.created_at
             FROM activity_log a
             LEFT JOIN tasks t ON t.id = a.task_id
             LEFT JOIN projects p ON p.id = a.project_id
             ORDER BY a.created_at DESC, a.id DESC
             LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Tasks created per day on or after `since` (`YYYY-MM-DD`), oldest day
    /// first. Days without tasks are absent.
    pub async fn created_trend(
        pool: &DbPool,
        since: &str,
        project_id: Option<&str>,
    ) -> Result<Vec<DailyCount>, sqlx::Error> {
        sqlx::query_as::<_, DailyCount>(
            "SELECT substr(created_at, 1, 10) AS date, COUNT(*) AS count
             FROM tasks
             WHERE substr(created_at, 1, 10) >= ?1
               AND (?2 IS NULL OR project_id = ?2)
             GROUP BY date
             ORDER BY date ASC",
        )
        .bind(since)
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Transitions into `done` per day on or after `since`, oldest day first.
    pub async fn completed_trend(
        pool: &DbPool,
        since: &str,
        project_id: Option<&str>,
    ) -> Result<Vec<DailyCount>, sqlx::Error> {
        sqlx::query_as::<_, DailyCount>(
            "SELECT substr(created_at, 1, 10) AS date, COUNT(*) AS count
             FROM activity_log
             WHERE action = ?1
               AND json_extract(details, '$.to') = 'done'
               AND substr(created_at, 1, 10) >= ?2
               AND (?3 IS NULL OR project_id = ?3)
             GROUP BY date
             ORDER BY date ASC",
        )
        .bind(STATUS_CHANGED)
        .bind(since)
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Total, done and in-progress task counts per project that has tasks.
    pub async fn tasks_per_project(
        pool: &DbPool,
        project_id: Option<&str>,
    ) -> Result<Vec<ProjectProgress>, sqlx::Error> {
        sqlx::query_as::<_, ProjectProgress>(
            "SELECT t.project_id,
                    p.name AS project_name,
                    COUNT(t.id) AS total,
                    COALESCE(SUM(CASE WHEN t.status = 'done' THEN 1 ELSE 0 END), 0) AS done,
                    COALESCE(SUM(CASE WHEN t.status = 'in_progress' THEN 1 ELSE 0 END), 0)
                        AS in_progress
             FROM tasks t
             LEFT JOIN projects p ON p.id = t.project_id
             WHERE (?1 IS NULL OR t.project_id = ?1)
             GROUP BY t.project_id
             ORDER BY p.created_at ASC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}
