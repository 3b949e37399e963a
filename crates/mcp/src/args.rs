//! Tool argument shapes. Argument names are camelCase on the wire.

use kanban_core::error::CoreError;
use kanban_core::task::{TaskPriority, TaskStatus};
use kanban_core::types::DbId;
use kanban_db::models::activity::ActivityQuery;
use kanban_db::models::double_option;
use kanban_db::models::label::CreateLabel;
use kanban_db::models::project::{CreateProject, UpdateProject};
use kanban_db::models::task::{CreateTask, MoveTask, TaskFilter, UpdateTask};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Decode tool arguments. A missing argument object counts as `{}`.
pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, CoreError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| CoreError::Validation(format!("Invalid arguments: {e}")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectIdArgs {
    pub project_id: DbId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskIdArgs {
    pub task_id: DbId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateProjectArgs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub repo_url: Option<String>,
}

impl From<CreateProjectArgs> for CreateProject {
    fn from(args: CreateProjectArgs) -> Self {
        CreateProject {
            name: args.name,
            description: args.description,
            repo_url: args.repo_url,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateProjectArgs {
    pub project_id: DbId,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub repo_url: Option<Option<String>>,
}

impl UpdateProjectArgs {
    pub fn into_parts(self) -> (DbId, UpdateProject) {
        let update = UpdateProject {
            name: self.name,
            description: self.description,
            repo_url: self.repo_url,
        };
        (self.project_id, update)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListTasksArgs {
    pub project_id: DbId,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl ListTasksArgs {
    pub fn filter(&self) -> TaskFilter {
        TaskFilter {
            status: self.status,
            priority: self.priority,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateTaskArgs {
    pub project_id: Option<DbId>,
    pub parent_task_id: Option<DbId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
}

impl From<CreateTaskArgs> for CreateTask {
    fn from(args: CreateTaskArgs) -> Self {
        CreateTask {
            project_id: args.project_id,
            parent_task_id: args.parent_task_id,
            title: args.title,
            description: args.description,
            status: args.status,
            priority: args.priority,
            assignee: args.assignee,
            due_date: args.due_date,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateTaskArgs {
    pub task_id: DbId,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
}

impl UpdateTaskArgs {
    pub fn into_parts(self) -> (DbId, UpdateTask) {
        let update = UpdateTask {
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            assignee: self.assignee,
            due_date: self.due_date,
        };
        (self.task_id, update)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MoveTaskArgs {
    pub task_id: DbId,
    pub new_status: TaskStatus,
    pub new_position: Option<i64>,
}

impl From<MoveTaskArgs> for MoveTask {
    fn from(args: MoveTaskArgs) -> Self {
        MoveTask {
            task_id: args.task_id,
            new_status: args.new_status,
            new_position: args.new_position,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCommentArgs {
    pub task_id: DbId,
    #[serde(default)]
    pub content: String,
    pub author: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateLabelArgs {
    pub project_id: DbId,
    pub name: Option<String>,
    pub color: Option<String>,
}

impl CreateLabelArgs {
    pub fn into_parts(self) -> (DbId, CreateLabel) {
        let input = CreateLabel {
            name: self.name,
            color: self.color,
        };
        (self.project_id, input)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LabelLinkArgs {
    pub task_id: DbId,
    pub label_id: DbId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListActivityArgs {
    pub task_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub limit: Option<i64>,
}

impl From<ListActivityArgs> for ActivityQuery {
    fn from(args: ListActivityArgs) -> Self {
        ActivityQuery {
            task_id: args.task_id,
            project_id: args.project_id,
            limit: args.limit,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchArgs {
    #[serde(default)]
    pub query: String,
    pub project_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExportArgs {
    pub project_id: Option<DbId>,
}
