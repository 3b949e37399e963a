//! Repository for the `projects` table.

use chrono::Utc;
use kanban_core::types::new_id;

use crate::models::project::{CreateProject, Project, ProjectWithTaskCount, UpdateProject};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, repo_url, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `name` is stored as given; callers apply the default for a blank name.
    pub async fn create(pool: &DbPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO projects (id, name, description, repo_url, created_at, updated_at)
             VALUES (?1, ?2, COALESCE(?3, ''), ?4, ?5, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(new_id())
            .bind(input.name.as_deref().unwrap_or_default())
            .bind(&input.description)
            .bind(&input.repo_url)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ?1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a project with the given ID exists.
    pub async fn exists(pool: &DbPool, id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List all projects, oldest first, each with its task count.
    pub async fn list_with_task_counts(
        pool: &DbPool,
    ) -> Result<Vec<ProjectWithTaskCount>, sqlx::Error> {
        sqlx::query_as::<_, ProjectWithTaskCount>(
            "SELECT p.id, p.name, p.description, p.repo_url, p.created_at, p.updated_at,
                    COUNT(t.id) AS task_count
             FROM projects p
             LEFT JOIN tasks t ON t.project_id = p.id
             GROUP BY p.id
             ORDER BY p.created_at ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a project. Only provided fields are applied; `updated_at` is
    /// always refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: &str,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE(?2, name),
                description = COALESCE(?3, description),
                repo_url = CASE WHEN ?4 THEN ?5 ELSE repo_url END,
                updated_at = ?6
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.repo_url.is_some())
            .bind(input.repo_url.clone().flatten())
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a project and, through cascades, its tasks, labels and
    /// activity. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of projects.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await
    }
}
