use kanban_core::activity::ACTOR_AGENT;
use kanban_db::models::activity::ActivityQuery;
use kanban_db::models::comment::{Comment, CreateComment};
use kanban_db::models::task::TaskWithLabels;
use kanban_db::DbPool;
use kanban_service::{KanbanService, ServiceResult};
use serde::Serialize;
use serde_json::Value;

use crate::args::*;
use crate::result::ToolResult;

/// A task with its comment thread, as returned by `get_task` and the
/// `kanban://task/{id}` resource.
#[derive(Debug, Serialize)]
pub(crate) struct TaskDetail {
    #[serde(flatten)]
    pub task: TaskWithLabels,
    pub comments: Vec<Comment>,
}

/// Tool and resource handlers bound to the `mcp-agent` actor.
#[derive(Clone)]
pub struct KanbanTools {
    pub(crate) service: KanbanService,
}

impl KanbanTools {
    pub fn new(pool: DbPool) -> Self {
        Self::from_service(&KanbanService::new(pool))
    }

    /// Share `service`'s pool and column locks, attributing writes to the
    /// agent.
    pub fn from_service(service: &KanbanService) -> Self {
        Self {
            service: service.with_actor(ACTOR_AGENT),
        }
    }

    pub fn service(&self) -> &KanbanService {
        &self.service
    }

    pub(crate) async fn task_detail(&self, task_id: &str) -> ServiceResult<TaskDetail> {
        let task = self.service.get_task(task_id).await?;
        let comments = self.service.list_comments(task_id).await?;
        Ok(TaskDetail { task, comments })
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    pub(crate) async fn tool_list_projects(&self, _args: Value) -> ServiceResult<ToolResult> {
        ToolResult::json(&self.service.list_projects().await?)
    }

    pub(crate) async fn tool_get_project(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: ProjectIdArgs = parse_args(args)?;
        ToolResult::json(&self.service.get_project(&args.project_id).await?)
    }

    pub(crate) async fn tool_create_project(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: CreateProjectArgs = parse_args(args)?;
        let project = self.service.create_project(args.into()).await?;
        Ok(ToolResult::text(format!(
            "Project \"{}\" created with ID: {}",
            project.name, project.id
        )))
    }

    pub(crate) async fn tool_update_project(&self, args: Value) -> ServiceResult<ToolResult> {
        let (id, update) = parse_args::<UpdateProjectArgs>(args)?.into_parts();
        let project = self.service.update_project(&id, update).await?;
        Ok(ToolResult::text(format!("Project {} updated", project.id)))
    }

    pub(crate) async fn tool_delete_project(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: ProjectIdArgs = parse_args(args)?;
        self.service.delete_project(&args.project_id).await?;
        Ok(ToolResult::text(format!("Project {} deleted", args.project_id)))
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    pub(crate) async fn tool_list_tasks(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: ListTasksArgs = parse_args(args)?;
        let tasks = self
            .service
            .list_tasks(Some(args.project_id.as_str()), args.filter())
            .await?;
        ToolResult::json(&tasks)
    }

    pub(crate) async fn tool_get_task(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: TaskIdArgs = parse_args(args)?;
        ToolResult::json(&self.task_detail(&args.task_id).await?)
    }

    pub(crate) async fn tool_create_task(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: CreateTaskArgs = parse_args(args)?;
        let created = self.service.create_task(args.into()).await?;
        Ok(ToolResult::text(format!(
            "Task \"{}\" created with ID: {} in status \"{}\"",
            created.task.title, created.task.id, created.task.status
        )))
    }

    pub(crate) async fn tool_update_task(&self, args: Value) -> ServiceResult<ToolResult> {
        let (id, update) = parse_args::<UpdateTaskArgs>(args)?.into_parts();
        let updated = self.service.update_task(&id, update).await?;
        Ok(ToolResult::text(format!("Task \"{}\" updated", updated.task.title)))
    }

    pub(crate) async fn tool_delete_task(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: TaskIdArgs = parse_args(args)?;
        self.service.delete_task(&args.task_id).await?;
        Ok(ToolResult::text(format!("Task {} deleted", args.task_id)))
    }

    pub(crate) async fn tool_move_task(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: MoveTaskArgs = parse_args(args)?;
        let from = self.service.get_task(&args.task_id).await?.task.status;
        let moved = self.service.move_task(args.into()).await?;
        Ok(ToolResult::text(format!(
            "Task \"{}\" moved from \"{}\" to \"{}\" at position {}",
            moved.task.title, from, moved.task.status, moved.task.position
        )))
    }

    pub(crate) async fn tool_search_tasks(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: SearchArgs = parse_args(args)?;
        let results = self
            .service
            .search_tasks(&args.query, args.project_id.as_deref())
            .await?;
        if results.is_empty() {
            return Ok(ToolResult::text(format!(
                "No tasks found matching \"{}\"",
                args.query.trim()
            )));
        }
        ToolResult::json(&results)
    }

    // -----------------------------------------------------------------------
    // Comments
    // -----------------------------------------------------------------------

    pub(crate) async fn tool_add_comment(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: AddCommentArgs = parse_args(args)?;
        let input = CreateComment {
            content: args.content,
            author: args.author,
        };
        self.service.add_comment(&args.task_id, input).await?;
        Ok(ToolResult::text(format!("Comment added to task {}", args.task_id)))
    }

    pub(crate) async fn tool_list_comments(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: TaskIdArgs = parse_args(args)?;
        ToolResult::json(&self.service.list_comments(&args.task_id).await?)
    }

    // -----------------------------------------------------------------------
    // Labels
    // -----------------------------------------------------------------------

    pub(crate) async fn tool_list_labels(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: ProjectIdArgs = parse_args(args)?;
        ToolResult::json(&self.service.list_labels(&args.project_id).await?)
    }

    pub(crate) async fn tool_create_label(&self, args: Value) -> ServiceResult<ToolResult> {
        let (project_id, input) = parse_args::<CreateLabelArgs>(args)?.into_parts();
        let label = self.service.create_label(&project_id, input).await?;
        Ok(ToolResult::text(format!(
            "Label \"{}\" created with ID: {}",
            label.name, label.id
        )))
    }

    pub(crate) async fn tool_assign_label(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: LabelLinkArgs = parse_args(args)?;
        let created = self
            .service
            .assign_label(&args.task_id, &args.label_id)
            .await?;
        let text = if created {
            format!("Label {} assigned to task {}", args.label_id, args.task_id)
        } else {
            format!(
                "Label {} was already assigned to task {}",
                args.label_id, args.task_id
            )
        };
        Ok(ToolResult::text(text))
    }

    pub(crate) async fn tool_unassign_label(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: LabelLinkArgs = parse_args(args)?;
        let removed = self
            .service
            .unassign_label(&args.task_id, &args.label_id)
            .await?;
        let text = if removed {
            format!("Label {} removed from task {}", args.label_id, args.task_id)
        } else {
            format!(
                "Label {} was not assigned to task {}",
                args.label_id, args.task_id
            )
        };
        Ok(ToolResult::text(text))
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    pub(crate) async fn tool_list_activity(&self, args: Value) -> ServiceResult<ToolResult> {
        let query: ActivityQuery = parse_args::<ListActivityArgs>(args)?.into();
        ToolResult::json(&self.service.list_activity(&query).await?)
    }

    pub(crate) async fn tool_get_dashboard_summary(
        &self,
        _args: Value,
    ) -> ServiceResult<ToolResult> {
        ToolResult::json(&self.service.dashboard_summary().await?)
    }

    pub(crate) async fn tool_export_tasks(&self, args: Value) -> ServiceResult<ToolResult> {
        let args: ExportArgs = parse_args(args)?;
        let csv = self.service.export_csv(args.project_id.as_deref()).await?;
        Ok(ToolResult::text(csv))
    }
}
