#![allow(dead_code)]

use kanban_core::task::TaskStatus;
use kanban_db::models::activity::{ActivityLog, ActivityQuery};
use kanban_db::models::project::CreateProject;
use kanban_db::models::task::{CreateTask, TaskFilter, TaskWithLabels};
use kanban_service::KanbanService;
use sqlx::SqlitePool;

pub fn service(pool: SqlitePool) -> KanbanService {
    KanbanService::new(pool)
}

pub async fn project(svc: &KanbanService, name: &str) -> String {
    let input = CreateProject {
        name: Some(name.to_string()),
        ..Default::default()
    };
    svc.create_project(input).await.unwrap().id
}

pub fn task_input(project_id: &str, title: &str) -> CreateTask {
    CreateTask {
        project_id: Some(project_id.to_string()),
        title: Some(title.to_string()),
        ..Default::default()
    }
}

pub async fn task(svc: &KanbanService, project_id: &str, title: &str) -> TaskWithLabels {
    svc.create_task(task_input(project_id, title)).await.unwrap()
}

pub async fn task_in(
    svc: &KanbanService,
    project_id: &str,
    title: &str,
    status: TaskStatus,
) -> TaskWithLabels {
    let input = CreateTask {
        status: Some(status),
        ..task_input(project_id, title)
    };
    svc.create_task(input).await.unwrap()
}

/// `(title, position)` pairs of one column in board order.
pub async fn column(
    svc: &KanbanService,
    project_id: &str,
    status: TaskStatus,
) -> Vec<(String, i64)> {
    let filter = TaskFilter {
        status: Some(status),
        priority: None,
    };
    svc.list_tasks(Some(project_id), filter)
        .await
        .unwrap()
        .into_iter()
        .map(|t| (t.task.title, t.task.position))
        .collect()
}

pub async fn project_activity(svc: &KanbanService, project_id: &str) -> Vec<ActivityLog> {
    let query = ActivityQuery {
        project_id: Some(project_id.to_string()),
        ..Default::default()
    };
    svc.list_activity(&query).await.unwrap()
}

pub fn actions(entries: &[ActivityLog]) -> Vec<&str> {
    entries.iter().map(|e| e.action.as_str()).collect()
}
