//! `kanban://` resource listing and reads.

use assert_matches::assert_matches;
use kanban_core::error::CoreError;
use kanban_mcp::resources::TASK_RESOURCE_LIMIT;
use kanban_mcp::KanbanTools;
use kanban_service::ServiceError;
use serde_json::{json, Value};
use sqlx::SqlitePool;

async fn seed(tools: &KanbanTools) -> (String, String) {
    let result = tools
        .call("create_project", json!({ "name": "Docs" }))
        .await;
    let project_id = result.text_content().rsplit("ID: ").next().unwrap().to_string();
    let result = tools
        .call(
            "create_task",
            json!({ "projectId": project_id, "title": "Write intro" }),
        )
        .await;
    let task_id = result
        .text_content()
        .rsplit("ID: ")
        .next()
        .unwrap()
        .split_whitespace()
        .next()
        .unwrap()
        .to_string();
    (project_id, task_id)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_names_every_concrete_uri(pool: SqlitePool) {
    let tools = KanbanTools::new(pool);
    let (project_id, task_id) = seed(&tools).await;

    let resources = tools.list_resources().await.unwrap();
    let uris: Vec<_> = resources.iter().map(|r| r.uri.as_str()).collect();
    assert_eq!(
        uris,
        [
            "kanban://projects".to_string(),
            format!("kanban://project/{project_id}"),
            format!("kanban://project/{project_id}/tasks"),
            format!("kanban://task/{task_id}"),
        ]
    );
    assert_eq!(resources[2].name, "Docs - Tasks");
    assert_eq!(resources[3].name, "Write intro");
    assert!(resources.iter().all(|r| r.mime_type == "application/json"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn task_listing_is_capped(pool: SqlitePool) {
    let tools = KanbanTools::new(pool);
    let (project_id, _) = seed(&tools).await;
    for i in 0..TASK_RESOURCE_LIMIT {
        tools
            .call(
                "create_task",
                json!({ "projectId": project_id, "title": format!("Task {i}") }),
            )
            .await;
    }

    let resources = tools.list_resources().await.unwrap();
    let task_uris = resources
        .iter()
        .filter(|r| r.uri.starts_with("kanban://task/"))
        .count();
    assert_eq!(task_uris, TASK_RESOURCE_LIMIT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reads_return_json_bodies(pool: SqlitePool) {
    let tools = KanbanTools::new(pool);
    let (project_id, task_id) = seed(&tools).await;

    let projects = tools.read_resource("kanban://projects").await.unwrap();
    let body: Value = serde_json::from_str(&projects.text).unwrap();
    assert_eq!(body[0]["task_count"], 1);

    let uri = format!("kanban://project/{project_id}/tasks");
    let tasks = tools.read_resource(&uri).await.unwrap();
    assert_eq!(tasks.uri, uri);
    let body: Value = serde_json::from_str(&tasks.text).unwrap();
    assert_eq!(body[0]["title"], "Write intro");

    let task = tools
        .read_resource(&format!("kanban://task/{task_id}"))
        .await
        .unwrap();
    let body: Value = serde_json::from_str(&task.text).unwrap();
    assert_eq!(body["comments"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bad_uris_and_missing_rows_are_errors(pool: SqlitePool) {
    let tools = KanbanTools::new(pool);

    let err = tools.read_resource("kanban://nope").await.unwrap_err();
    assert_matches!(err, ServiceError::Core(CoreError::Validation(_)));

    let err = tools
        .read_resource("kanban://project/ghost")
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::Core(CoreError::NotFound { entity: "Project", .. })
    );
}
