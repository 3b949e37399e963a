use serde_json::Value;

use crate::result::{format_service_error, ToolResult};
use crate::tools::KanbanTools;

macro_rules! define_tool_dispatch {
    ($($tool_name:literal => $method:ident),* $(,)?) => {
        impl KanbanTools {
            /// Run the tool `name` with `args`.
            ///
            /// Failures never escape: unknown tools, bad arguments and
            /// service errors all come back as `isError: true` results.
            pub async fn call(&self, name: &str, args: Value) -> ToolResult {
                let outcome = match name {
                    $($tool_name => self.$method(args).await,)*
                    _ => return ToolResult::error(format!("Unknown tool: {name}")),
                };
                match outcome {
                    Ok(result) => {
                        tracing::debug!(tool = name, "Tool call succeeded");
                        result
                    }
                    Err(err) => {
                        tracing::info!(tool = name, error = %err, "Tool call failed");
                        ToolResult::error(format_service_error(name, &err))
                    }
                }
            }
        }

        /// Names accepted by [`KanbanTools::call`].
        pub fn tool_names() -> &'static [&'static str] {
            &[$($tool_name),*]
        }
    };
}

define_tool_dispatch! {
    "list_projects" => tool_list_projects,
    "get_project" => tool_get_project,
    "create_project" => tool_create_project,
    "update_project" => tool_update_project,
    "delete_project" => tool_delete_project,
    "list_tasks" => tool_list_tasks,
    "get_task" => tool_get_task,
    "create_task" => tool_create_task,
    "update_task" => tool_update_task,
    "delete_task" => tool_delete_task,
    "move_task" => tool_move_task,
    "search_tasks" => tool_search_tasks,
    "add_comment" => tool_add_comment,
    "list_comments" => tool_list_comments,
    "list_labels" => tool_list_labels,
    "create_label" => tool_create_label,
    "assign_label" => tool_assign_label,
    "unassign_label" => tool_unassign_label,
    "list_activity" => tool_list_activity,
    "get_dashboard_summary" => tool_get_dashboard_summary,
    "export_tasks" => tool_export_tasks,
}
