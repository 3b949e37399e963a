use kanban_core::error::CoreError;
use kanban_core::task::{DEFAULT_LABEL_COLOR, DEFAULT_LABEL_NAME};
use kanban_core::validation::{or_default_text, require_text, validate_color};
use kanban_db::models::label::{CreateLabel, Label, UpdateLabel};
use kanban_db::repositories::LabelRepo;

use super::KanbanService;
use crate::error::ServiceResult;

impl KanbanService {
    /// A project's labels by name.
    pub async fn list_labels(&self, project_id: &str) -> ServiceResult<Vec<Label>> {
        self.require_project_exists(project_id).await?;
        Ok(LabelRepo::list_by_project(&self.pool, project_id).await?)
    }

    /// Create a label in a project. Name defaults to "Label", colour to
    /// `#6366f1`.
    pub async fn create_label(&self, project_id: &str, input: CreateLabel) -> ServiceResult<Label> {
        let name = or_default_text(input.name.as_deref(), DEFAULT_LABEL_NAME);
        let color = or_default_text(input.color.as_deref(), DEFAULT_LABEL_COLOR);
        validate_color(&color)?;
        self.require_project_exists(project_id).await?;

        let label = LabelRepo::create(&self.pool, project_id, &name, &color).await?;
        tracing::info!(label_id = %label.id, project_id, "Label created");
        Ok(label)
    }

    pub async fn update_label(&self, id: &str, input: UpdateLabel) -> ServiceResult<Label> {
        if let Some(name) = &input.name {
            require_text(name, "name")?;
        }
        if let Some(color) = &input.color {
            validate_color(color)?;
        }
        let label = LabelRepo::update(&self.pool, id, &input)
            .await?
            .ok_or_else(|| CoreError::not_found("Label", id))?;
        tracing::info!(label_id = %label.id, "Label updated");
        Ok(label)
    }

    /// Delete a label and detach it from every task.
    pub async fn delete_label(&self, id: &str) -> ServiceResult<()> {
        if !LabelRepo::delete(&self.pool, id).await? {
            return Err(CoreError::not_found("Label", id).into());
        }
        tracing::info!(label_id = %id, "Label deleted");
        Ok(())
    }

    /// Attach a label to a task.
    ///
    /// Both must exist and share a project. Assigning an already attached
    /// label succeeds without change; the return value says whether a new
    /// link was made.
    pub async fn assign_label(&self, task_id: &str, label_id: &str) -> ServiceResult<bool> {
        let task = self.require_task(task_id).await?;
        let label = self.require_label(label_id).await?;
        if label.project_id != task.project_id {
            return Err(CoreError::Validation(
                "Label belongs to a different project than the task".into(),
            )
            .into());
        }

        let created = LabelRepo::assign(&self.pool, task_id, label_id).await?;
        tracing::info!(task_id, label_id, created, "Label assigned");
        Ok(created)
    }

    /// Detach a label from a task. Removing a link that does not exist
    /// succeeds without change.
    pub async fn unassign_label(&self, task_id: &str, label_id: &str) -> ServiceResult<bool> {
        self.require_task(task_id).await?;
        self.require_label(label_id).await?;

        let removed = LabelRepo::unassign(&self.pool, task_id, label_id).await?;
        tracing::info!(task_id, label_id, removed, "Label unassigned");
        Ok(removed)
    }

    async fn require_label(&self, id: &str) -> ServiceResult<Label> {
        LabelRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::not_found("Label", id).into())
    }
}
