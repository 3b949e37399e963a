//! HTTP-level integration tests for activity, dashboard, analytics and export.

mod common;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use common::{body_json, body_text, delete, get, patch_json};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../db/migrations")]
async fn activity_records_task_lifecycle_newest_first(pool: SqlitePool) {
    let project_id = common::create_project(&pool, "Audit").await;
    let task = common::create_task(&pool, json!({"project_id": project_id, "title": "Track"})).await;
    let task_id = task["id"].as_str().unwrap();

    patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/tasks/{task_id}"),
        json!({"status": "in_progress"}),
    )
    .await;
    delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/tasks/{task_id}"),
    )
    .await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/activity?project_id={project_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let entries = json.as_array().unwrap();
    let actions: Vec<_> = entries.iter().map(|e| e["action"].as_str().unwrap()).collect();
    assert_eq!(actions, ["task_deleted"]);
    assert!(entries[0]["task_id"].is_null());
    assert_eq!(entries[0]["actor"], "user");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn activity_limit_is_applied(pool: SqlitePool) {
    let project_id = common::create_project(&pool, "Busy").await;
    for _ in 0..3 {
        common::create_task(&pool, json!({"project_id": project_id})).await;
    }

    let response = get(common::build_test_app(pool), "/api/v1/activity?limit=2").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn dashboard_counts_every_status_and_priority(pool: SqlitePool) {
    let project_id = common::create_project(&pool, "Dash").await;
    common::create_task(&pool, json!({"project_id": project_id, "status": "done"})).await;
    common::create_task(&pool, json!({"project_id": project_id, "priority": "high"})).await;

    let response = get(common::build_test_app(pool), "/api/v1/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total_projects"], 1);
    assert_eq!(json["total_tasks"], 2);
    assert_eq!(json["tasks_by_status"]["done"], 1);
    assert_eq!(json["tasks_by_status"]["backlog"], 1);
    assert_eq!(json["tasks_by_status"]["in_review"], 0);
    assert_eq!(json["tasks_by_priority"]["high"], 1);
    assert_eq!(json["tasks_by_priority"]["critical"], 0);
    assert_eq!(json["recent_activity"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn analytics_counts_todays_completions(pool: SqlitePool) {
    let project_id = common::create_project(&pool, "Stats").await;
    let task = common::create_task(&pool, json!({"project_id": project_id})).await;
    patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/tasks/{}", task["id"].as_str().unwrap()),
        json!({"status": "done"}),
    )
    .await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/analytics?project_id={project_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["created_trend"][0]["count"], 1);
    assert_eq!(json["completed_trend"][0]["count"], 1);
    assert_eq!(json["tasks_per_project"][0]["done"], 1);
    assert_eq!(json["recent_completions"].as_array().unwrap().len(), 1);

    let response = get(common::build_test_app(pool), "/api/v1/analytics?project_id=ghost").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn export_returns_csv_attachment(pool: SqlitePool) {
    let project_id = common::create_project(&pool, "Ship").await;
    common::create_task(
        &pool,
        json!({"project_id": project_id, "title": "Say \"hi\", world"}),
    )
    .await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/export?project_id={project_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[CONTENT_TYPE].to_str().unwrap(),
        "text/csv; charset=utf-8"
    );
    let disposition = response.headers()[CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=\"kanban-export-"));
    assert!(disposition.ends_with(".csv\""));

    let csv = body_text(response).await;
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "ID,Project,Title,Description,Status,Priority,Assignee,Due Date,Created At,Updated At"
    );
    let row = lines.next().unwrap();
    assert!(row.contains("\"Say \"\"hi\"\", world\""));
    assert!(row.contains(",backlog,medium,"));
    assert!(lines.next().is_none());
}
