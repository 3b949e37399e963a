//! Concurrent writers against the same and different columns.

mod common;

use std::collections::HashSet;

use futures::future::join_all;
use kanban_core::task::TaskStatus;
use kanban_db::models::task::MoveTask;
use sqlx::SqlitePool;

use common::*;

/// Appends race on one column: every task persists and ranks stay unique
/// because the max-then-insert runs as a single statement.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_concurrent_creates_get_distinct_ranks(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;

    let creates = (0..20).map(|i| {
        let svc = svc.clone();
        let p = p.clone();
        async move { svc.create_task(task_input(&p, &format!("T{i}"))).await }
    });
    let results = join_all(creates).await;
    assert!(results.iter().all(Result::is_ok));

    let col = column(&svc, &p, TaskStatus::Backlog).await;
    assert_eq!(col.len(), 20);
    let ranks: HashSet<i64> = col.iter().map(|(_, pos)| *pos).collect();
    assert_eq!(ranks.len(), 20);
}

/// Explicit reorders into one column from many tasks at once: no task is
/// lost and the serialized shift-then-set keeps ranks unique.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_concurrent_reorders_lose_no_rows(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;

    for i in 0..5 {
        task_in(&svc, &p, &format!("Existing {i}"), TaskStatus::Todo).await;
    }
    let mut movers = Vec::new();
    for i in 0..10 {
        movers.push(task(&svc, &p, &format!("Mover {i}")).await.task.id);
    }

    let moves = movers.iter().enumerate().map(|(i, id)| {
        let svc = svc.clone();
        let input = MoveTask {
            task_id: id.clone(),
            new_status: TaskStatus::Todo,
            new_position: Some((i % 3) as i64),
        };
        async move { svc.move_task(input).await }
    });
    let results = join_all(moves).await;
    assert!(results.iter().all(Result::is_ok));

    let todo = column(&svc, &p, TaskStatus::Todo).await;
    assert_eq!(todo.len(), 15);
    assert!(column(&svc, &p, TaskStatus::Backlog).await.is_empty());

    let ranks: HashSet<i64> = todo.iter().map(|(_, pos)| *pos).collect();
    assert_eq!(ranks.len(), 15);
}
