//! Read-only `kanban://` resources.
//!
//! ```text
//! kanban://projects              every project with its task count
//! kanban://project/{id}          one project
//! kanban://project/{id}/tasks    a project's tasks in board order
//! kanban://task/{id}             one task with its comments
//! ```

use kanban_core::error::CoreError;
use kanban_db::models::task::TaskFilter;
use kanban_service::ServiceResult;
use serde::Serialize;
use serde_json::{json, Value};

use crate::result::ToolResult;
use crate::tools::KanbanTools;

const SCHEME: &str = "kanban://";
const MIME_JSON: &str = "application/json";

/// Upper bound on concrete task URIs returned by a listing.
pub const TASK_RESOURCE_LIMIT: usize = 50;

/// A concrete resource offered by `resources/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
}

/// The body returned by `resources/read`.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceContents {
    pub uri: String,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
    pub text: String,
}

/// URI templates for `resources/templates/list`.
pub fn resource_templates() -> Vec<Value> {
    vec![
        json!({
            "uriTemplate": "kanban://project/{id}",
            "name": "project-detail",
            "title": "Project Detail",
            "description": "Details of a specific project",
            "mimeType": MIME_JSON
        }),
        json!({
            "uriTemplate": "kanban://project/{id}/tasks",
            "name": "project-tasks",
            "title": "Project Tasks",
            "description": "Tasks for a specific project",
            "mimeType": MIME_JSON
        }),
        json!({
            "uriTemplate": "kanban://task/{id}",
            "name": "task-detail",
            "title": "Task Detail",
            "description": "Details of a specific task",
            "mimeType": MIME_JSON
        }),
    ]
}

#[derive(Debug, PartialEq, Eq)]
enum ResourceUri<'a> {
    Projects,
    Project(&'a str),
    ProjectTasks(&'a str),
    Task(&'a str),
}

impl<'a> ResourceUri<'a> {
    fn parse(uri: &'a str) -> Option<Self> {
        let path = uri.strip_prefix(SCHEME)?;
        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            ["projects"] => Some(Self::Projects),
            ["project", id] if !id.is_empty() => Some(Self::Project(*id)),
            ["project", id, "tasks"] if !id.is_empty() => Some(Self::ProjectTasks(*id)),
            ["task", id] if !id.is_empty() => Some(Self::Task(*id)),
            _ => None,
        }
    }
}

impl KanbanTools {
    /// Every concrete resource: the project list, each project and its task
    /// list, and up to [`TASK_RESOURCE_LIMIT`] tasks.
    pub async fn list_resources(&self) -> ServiceResult<Vec<ResourceDescriptor>> {
        let projects = self.service.list_projects().await?;

        let mut resources = vec![ResourceDescriptor {
            uri: format!("{SCHEME}projects"),
            name: "All Projects".to_string(),
            mime_type: MIME_JSON,
        }];
        for entry in &projects {
            let project = &entry.project;
            resources.push(ResourceDescriptor {
                uri: format!("{SCHEME}project/{}", project.id),
                name: project.name.clone(),
                mime_type: MIME_JSON,
            });
            resources.push(ResourceDescriptor {
                uri: format!("{SCHEME}project/{}/tasks", project.id),
                name: format!("{} - Tasks", project.name),
                mime_type: MIME_JSON,
            });
        }

        let mut listed = 0;
        for entry in &projects {
            if listed >= TASK_RESOURCE_LIMIT {
                break;
            }
            let tasks = self
                .service
                .list_tasks(Some(entry.project.id.as_str()), TaskFilter::default())
                .await?;
            for task in tasks.into_iter().take(TASK_RESOURCE_LIMIT - listed) {
                resources.push(ResourceDescriptor {
                    uri: format!("{SCHEME}task/{}", task.task.id),
                    name: task.task.title,
                    mime_type: MIME_JSON,
                });
                listed += 1;
            }
        }

        Ok(resources)
    }

    /// Read one resource. Unknown URIs are a validation error; URIs naming
    /// a missing row are `NotFound`.
    pub async fn read_resource(&self, uri: &str) -> ServiceResult<ResourceContents> {
        let parsed = ResourceUri::parse(uri)
            .ok_or_else(|| CoreError::Validation(format!("Unknown resource URI '{uri}'")))?;

        let body = match parsed {
            ResourceUri::Projects => ToolResult::json(&self.service.list_projects().await?)?,
            ResourceUri::Project(id) => ToolResult::json(&self.service.get_project(id).await?)?,
            ResourceUri::ProjectTasks(id) => ToolResult::json(
                &self
                    .service
                    .list_tasks(Some(id), TaskFilter::default())
                    .await?,
            )?,
            ResourceUri::Task(id) => ToolResult::json(&self.task_detail(id).await?)?,
        };

        Ok(ResourceContents {
            uri: uri.to_string(),
            mime_type: MIME_JSON,
            text: body.text_content(),
        })
    }
}
