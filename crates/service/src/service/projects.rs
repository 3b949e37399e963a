use kanban_core::error::CoreError;
use kanban_core::task::DEFAULT_PROJECT_NAME;
use kanban_core::validation::{or_default_text, require_text};
use kanban_db::models::project::{CreateProject, Project, ProjectWithTaskCount, UpdateProject};
use kanban_db::repositories::{ProjectRepo, TaskRepo};

use super::KanbanService;
use crate::error::ServiceResult;

impl KanbanService {
    /// All projects, oldest first, with their task counts.
    pub async fn list_projects(&self) -> ServiceResult<Vec<ProjectWithTaskCount>> {
        Ok(ProjectRepo::list_with_task_counts(&self.pool).await?)
    }

    pub async fn get_project(&self, id: &str) -> ServiceResult<Project> {
        self.require_project(id).await
    }

    /// Create a project. A blank or missing name becomes "Untitled Project".
    pub async fn create_project(&self, input: CreateProject) -> ServiceResult<Project> {
        let input = CreateProject {
            name: Some(or_default_text(input.name.as_deref(), DEFAULT_PROJECT_NAME)),
            ..input
        };
        let project = ProjectRepo::create(&self.pool, &input).await?;
        tracing::info!(project_id = %project.id, name = %project.name, "Project created");
        Ok(project)
    }

    /// Apply a partial update. `updated_at` is refreshed even when no field
    /// changes.
    pub async fn update_project(&self, id: &str, input: UpdateProject) -> ServiceResult<Project> {
        if let Some(name) = &input.name {
            require_text(name, "name")?;
        }
        let project = ProjectRepo::update(&self.pool, id, &input)
            .await?
            .ok_or_else(|| CoreError::not_found("Project", id))?;
        tracing::info!(project_id = %project.id, "Project updated");
        Ok(project)
    }

    /// Delete a project together with its tasks, labels and activity.
    pub async fn delete_project(&self, id: &str) -> ServiceResult<()> {
        let task_count = TaskRepo::count_by_project(&self.pool, id).await?;
        if !ProjectRepo::delete(&self.pool, id).await? {
            return Err(CoreError::not_found("Project", id).into());
        }
        tracing::info!(project_id = %id, task_count, "Project deleted");
        Ok(())
    }
}
