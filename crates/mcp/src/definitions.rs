use serde_json::{json, Value};

fn status_schema(description: &str) -> Value {
    json!({
        "type": "string",
        "enum": ["backlog", "todo", "in_progress", "in_review", "done"],
        "description": description
    })
}

fn priority_schema(description: &str) -> Value {
    json!({
        "type": "string",
        "enum": ["critical", "high", "medium", "low"],
        "description": description
    })
}

fn id_schema(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn text_schema(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

/// Text that may be cleared with an explicit `null`.
fn nullable_text_schema(description: &str) -> Value {
    json!({ "type": ["string", "null"], "description": description })
}

fn tool(name: &str, description: &str, properties: Value, required: &[&str]) -> Value {
    json!({
        "name": name,
        "description": description,
        "inputSchema": {
            "type": "object",
            "properties": properties,
            "required": required
        }
    })
}

/// Every tool with its JSON Schema input, sorted by name.
pub fn tool_definitions() -> Vec<Value> {
    let mut tools = vec![
        // Projects
        tool("list_projects", "List all projects with task counts", json!({}), &[]),
        tool(
            "get_project",
            "Get details of a specific project",
            json!({ "projectId": id_schema("The project ID") }),
            &["projectId"],
        ),
        tool(
            "create_project",
            "Create a new project",
            json!({
                "name": text_schema("Project name"),
                "description": text_schema("Project description"),
                "repoUrl": text_schema("Repository URL")
            }),
            &["name"],
        ),
        tool(
            "update_project",
            "Update an existing project",
            json!({
                "projectId": id_schema("The project ID"),
                "name": text_schema("New project name"),
                "description": text_schema("New description"),
                "repoUrl": nullable_text_schema("New repository URL, or null to clear it")
            }),
            &["projectId"],
        ),
        tool(
            "delete_project",
            "Delete a project along with its tasks and labels",
            json!({ "projectId": id_schema("The project ID to delete") }),
            &["projectId"],
        ),
        // Tasks
        tool(
            "list_tasks",
            "List tasks for a project, optionally filtered by status or priority",
            json!({
                "projectId": id_schema("The project ID"),
                "status": status_schema("Filter by status"),
                "priority": priority_schema("Filter by priority")
            }),
            &["projectId"],
        ),
        tool(
            "get_task",
            "Get a task with its labels, subtask progress and comments",
            json!({ "taskId": id_schema("The task ID") }),
            &["taskId"],
        ),
        tool(
            "create_task",
            "Create a new task at the end of its status column",
            json!({
                "projectId": id_schema("The project ID"),
                "title": text_schema("Task title"),
                "description": text_schema("Task description"),
                "status": status_schema("Initial status (default: backlog)"),
                "priority": priority_schema("Priority (default: medium)"),
                "assignee": text_schema("Assignee name"),
                "dueDate": text_schema("Due date (ISO 8601)"),
                "parentTaskId": id_schema("Parent task ID for subtasks")
            }),
            &["projectId", "title"],
        ),
        tool(
            "update_task",
            "Update fields of an existing task",
            json!({
                "taskId": id_schema("The task ID"),
                "title": text_schema("New title"),
                "description": nullable_text_schema("New description"),
                "status": status_schema("New status; the task moves to the end of that column"),
                "priority": priority_schema("New priority"),
                "assignee": nullable_text_schema("New assignee"),
                "dueDate": nullable_text_schema("New due date (ISO 8601)")
            }),
            &["taskId"],
        ),
        tool(
            "delete_task",
            "Delete a task",
            json!({ "taskId": id_schema("The task ID to delete") }),
            &["taskId"],
        ),
        tool(
            "move_task",
            "Move a task to a status column, optionally at a given position",
            json!({
                "taskId": id_schema("The task ID"),
                "newStatus": status_schema("Target status column"),
                "newPosition": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Zero-based index in the target column; omit to append"
                }
            }),
            &["taskId", "newStatus"],
        ),
        tool(
            "search_tasks",
            "Search task titles by keyword across all projects",
            json!({
                "query": text_schema("Search keyword"),
                "projectId": id_schema("Limit search to a specific project")
            }),
            &["query"],
        ),
        // Comments
        tool(
            "add_comment",
            "Add a comment to a task",
            json!({
                "taskId": id_schema("The task ID"),
                "content": text_schema("Comment text"),
                "author": text_schema("Comment author (default: mcp-agent)")
            }),
            &["taskId", "content"],
        ),
        tool(
            "list_comments",
            "List comments on a task, newest first",
            json!({ "taskId": id_schema("The task ID") }),
            &["taskId"],
        ),
        // Labels
        tool(
            "list_labels",
            "List the labels defined for a project",
            json!({ "projectId": id_schema("The project ID") }),
            &["projectId"],
        ),
        tool(
            "create_label",
            "Create a label in a project",
            json!({
                "projectId": id_schema("The project ID"),
                "name": text_schema("Label name"),
                "color": text_schema("Hex color such as #6366f1")
            }),
            &["projectId"],
        ),
        tool(
            "assign_label",
            "Attach a label to a task of the same project",
            json!({
                "taskId": id_schema("The task ID"),
                "labelId": id_schema("The label ID")
            }),
            &["taskId", "labelId"],
        ),
        tool(
            "unassign_label",
            "Detach a label from a task",
            json!({
                "taskId": id_schema("The task ID"),
                "labelId": id_schema("The label ID")
            }),
            &["taskId", "labelId"],
        ),
        // Views
        tool(
            "list_activity",
            "List recent activity, newest first",
            json!({
                "taskId": id_schema("Only activity for this task"),
                "projectId": id_schema("Only activity for this project"),
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 200,
                    "description": "Maximum entries (default: 30)"
                }
            }),
            &[],
        ),
        tool(
            "get_dashboard_summary",
            "Get counts by status and priority plus recent activity",
            json!({}),
            &[],
        ),
        tool(
            "export_tasks",
            "Export tasks as CSV",
            json!({ "projectId": id_schema("Only export this project's tasks") }),
            &[],
        ),
    ];

    tools.sort_by_key(|tool| {
        tool.get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    });
    tools
}
