//! Service-level tests for task creation, updates, moves and deletion.
//!
//! Covers column ranking, activity firing rules and the validation and
//! not-found outcomes of each task operation.

mod common;

use assert_matches::assert_matches;
use kanban_core::activity::{ActivityEvent, ACTOR_AGENT, ACTOR_USER};
use kanban_core::error::CoreError;
use kanban_core::task::{TaskPriority, TaskStatus};
use kanban_db::models::activity::ActivityQuery;
use kanban_db::models::task::{CreateTask, MoveTask, UpdateTask};
use kanban_service::ServiceError;
use sqlx::SqlitePool;

use common::*;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_sequential_creates_are_dense(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;

    for i in 0..5 {
        let created = task(&svc, &p, &format!("T{i}")).await;
        assert_eq!(created.task.position, i);
    }

    let col = column(&svc, &p, TaskStatus::Backlog).await;
    let titles: Vec<_> = col.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(titles, ["T0", "T1", "T2", "T3", "T4"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_then_get_round_trip(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;

    let input = CreateTask {
        description: Some("details".into()),
        assignee: Some("sam".into()),
        due_date: Some("2024-06-01".into()),
        ..task_input(&p, "Ship it")
    };
    let created = svc.create_task(input).await.unwrap();
    let fetched = svc.get_task(&created.task.id).await.unwrap();

    assert_eq!(fetched.task.title, "Ship it");
    assert_eq!(fetched.task.description.as_deref(), Some("details"));
    assert_eq!(fetched.task.assignee.as_deref(), Some("sam"));
    assert_eq!(fetched.task.due_date.as_deref(), Some("2024-06-01"));
    assert_eq!(fetched.task.status, TaskStatus::Backlog);
    assert_eq!(fetched.task.priority, TaskPriority::Medium);
    assert!(fetched.labels.is_empty());
    assert_eq!(fetched.comment_count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_defaults_blank_title(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;

    let created = svc.create_task(task_input(&p, "   ")).await.unwrap();
    assert_eq!(created.task.title, "Untitled Task");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_requires_project_id(pool: SqlitePool) {
    let svc = service(pool);

    let result = svc.create_task(CreateTask::default()).await;
    assert_matches!(result, Err(ServiceError::Core(CoreError::Validation(_))));

    let result = svc.create_task(task_input("missing", "T")).await;
    assert_matches!(
        result,
        Err(ServiceError::Core(CoreError::NotFound { entity: "Project", .. }))
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_logs_task_created(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    let created = task(&svc, &p, "Logged").await;

    let entries = project_activity(&svc, &p).await;
    assert_eq!(actions(&entries), ["task_created"]);
    assert_eq!(entries[0].task_id.as_deref(), Some(created.task.id.as_str()));
    assert_eq!(entries[0].actor.as_deref(), Some(ACTOR_USER));

    let event =
        ActivityEvent::from_stored(&entries[0].action, entries[0].details.as_deref().unwrap())
            .unwrap();
    assert_eq!(
        event,
        ActivityEvent::TaskCreated {
            title: "Logged".into()
        }
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_subtask_must_share_project(pool: SqlitePool) {
    let svc = service(pool);
    let p1 = project(&svc, "One").await;
    let p2 = project(&svc, "Two").await;
    let parent = task(&svc, &p1, "Parent").await;

    let child = CreateTask {
        parent_task_id: Some(parent.task.id.clone()),
        ..task_input(&p1, "Child")
    };
    let child = svc.create_task(child).await.unwrap();
    assert_eq!(child.task.parent_task_id.as_deref(), Some(parent.task.id.as_str()));

    let stray = CreateTask {
        parent_task_id: Some(parent.task.id.clone()),
        ..task_input(&p2, "Stray")
    };
    let result = svc.create_task(stray).await;
    assert_matches!(result, Err(ServiceError::Core(CoreError::Validation(_))));

    let refreshed = svc.get_task(&parent.task.id).await.unwrap();
    assert_eq!(refreshed.subtask_count, 1);
    assert_eq!(refreshed.subtask_done_count, 0);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_same_status_update_logs_nothing(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    let t = task(&svc, &p, "Stay").await;

    let input = UpdateTask {
        status: Some(TaskStatus::Backlog),
        priority: Some(TaskPriority::Medium),
        ..Default::default()
    };
    let updated = svc.update_task(&t.task.id, input).await.unwrap();

    assert_eq!(updated.task.position, 0);
    assert_eq!(actions(&project_activity(&svc, &p).await), ["task_created"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_status_and_priority_change_log_once_each(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    task_in(&svc, &p, "Already done", TaskStatus::Done).await;
    let t = task(&svc, &p, "Finish").await;

    let input = UpdateTask {
        status: Some(TaskStatus::Done),
        priority: Some(TaskPriority::High),
        title: Some("Finished".into()),
        ..Default::default()
    };
    let updated = svc.update_task(&t.task.id, input).await.unwrap();

    assert_eq!(updated.task.status, TaskStatus::Done);
    assert_eq!(updated.task.position, 1, "appended after the existing done task");
    assert_eq!(updated.task.title, "Finished");

    let query = ActivityQuery {
        task_id: Some(t.task.id.clone()),
        ..Default::default()
    };
    let entries = svc.list_activity(&query).await.unwrap();
    let mut events: Vec<_> = entries
        .iter()
        .map(|e| ActivityEvent::from_stored(&e.action, e.details.as_deref().unwrap()).unwrap())
        .collect();
    events.sort_by_key(|e| e.action());

    assert_eq!(
        events,
        [
            ActivityEvent::PriorityChanged {
                from: TaskPriority::Medium,
                to: TaskPriority::High,
                title: "Finish".into(),
            },
            ActivityEvent::StatusChanged {
                from: TaskStatus::Backlog,
                to: TaskStatus::Done,
                title: "Finish".into(),
            },
            ActivityEvent::TaskCreated {
                title: "Finish".into()
            },
        ]
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_missing_task_is_not_found(pool: SqlitePool) {
    let svc = service(pool);
    let result = svc.update_task("nope", UpdateTask::default()).await;
    assert_matches!(
        result,
        Err(ServiceError::Core(CoreError::NotFound { entity: "Task", .. }))
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_rejects_blank_title(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    let t = task(&svc, &p, "Named").await;

    let input = UpdateTask {
        title: Some(" ".into()),
        ..Default::default()
    };
    let result = svc.update_task(&t.task.id, input).await;
    assert_matches!(result, Err(ServiceError::Core(CoreError::Validation(_))));
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// Three backlog tasks; the middle one moves to in_progress without an index.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_backlog_to_in_progress_scenario(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    let t1 = task(&svc, &p, "One").await;
    let t2 = task(&svc, &p, "Two").await;
    let t3 = task(&svc, &p, "Three").await;
    assert_eq!(
        [t1.task.position, t2.task.position, t3.task.position],
        [0, 1, 2]
    );

    let moved = svc
        .move_task(MoveTask {
            task_id: t2.task.id.clone(),
            new_status: TaskStatus::InProgress,
            new_position: None,
        })
        .await
        .unwrap();

    assert_eq!(moved.task.status, TaskStatus::InProgress);
    assert_eq!(moved.task.position, 0);
    assert_eq!(
        column(&svc, &p, TaskStatus::Backlog).await,
        [("One".to_string(), 0), ("Three".to_string(), 2)]
    );

    let entries = project_activity(&svc, &p).await;
    let changes: Vec<_> = entries
        .iter()
        .filter(|e| e.action == "status_changed")
        .collect();
    assert_eq!(changes.len(), 1);
    let event =
        ActivityEvent::from_stored(&changes[0].action, changes[0].details.as_deref().unwrap())
            .unwrap();
    assert_eq!(
        event,
        ActivityEvent::StatusChanged {
            from: TaskStatus::Backlog,
            to: TaskStatus::InProgress,
            title: "Two".into(),
        }
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_move_to_index_shifts_column(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    for title in ["A", "B", "C"] {
        task_in(&svc, &p, title, TaskStatus::Todo).await;
    }
    let m = task(&svc, &p, "M").await;

    svc.move_task(MoveTask {
        task_id: m.task.id.clone(),
        new_status: TaskStatus::Todo,
        new_position: Some(1),
    })
    .await
    .unwrap();

    let col = column(&svc, &p, TaskStatus::Todo).await;
    let titles: Vec<_> = col.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(titles, ["A", "M", "B", "C"]);

    let mut ranks: Vec<_> = col.iter().map(|(_, pos)| *pos).collect();
    ranks.dedup();
    assert_eq!(ranks.len(), 4, "serialized moves never duplicate a rank");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reorder_within_column(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    task(&svc, &p, "A").await;
    task(&svc, &p, "B").await;
    let c = task(&svc, &p, "C").await;

    svc.move_task(MoveTask {
        task_id: c.task.id.clone(),
        new_status: TaskStatus::Backlog,
        new_position: Some(0),
    })
    .await
    .unwrap();

    let col = column(&svc, &p, TaskStatus::Backlog).await;
    let titles: Vec<_> = col.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(titles, ["C", "A", "B"]);

    let changes = project_activity(&svc, &p)
        .await
        .into_iter()
        .filter(|e| e.action == "status_changed")
        .count();
    assert_eq!(changes, 0, "same-column reorder is not a status change");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_move_past_end_appends(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    task_in(&svc, &p, "A", TaskStatus::Done).await;
    let m = task(&svc, &p, "M").await;

    let moved = svc
        .move_task(MoveTask {
            task_id: m.task.id.clone(),
            new_status: TaskStatus::Done,
            new_position: Some(10),
        })
        .await
        .unwrap();

    assert_eq!(moved.task.position, 1);
    let col = column(&svc, &p, TaskStatus::Done).await;
    assert_eq!(col.last().map(|(t, _)| t.as_str()), Some("M"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_huge_reorder_index_keeps_column_usable(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    task_in(&svc, &p, "A", TaskStatus::Todo).await;
    let m = task(&svc, &p, "M").await;

    let moved = svc
        .move_task(MoveTask {
            task_id: m.task.id.clone(),
            new_status: TaskStatus::Todo,
            new_position: Some(i64::MAX),
        })
        .await
        .unwrap();
    assert_eq!(moved.task.position, 1);

    let appended = task_in(&svc, &p, "B", TaskStatus::Todo).await;
    assert_eq!(appended.task.position, 2);

    let col = column(&svc, &p, TaskStatus::Todo).await;
    assert_eq!(
        col,
        [("A".to_string(), 0), ("M".to_string(), 1), ("B".to_string(), 2)]
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reorder_last_task_to_end_keeps_rank(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    task(&svc, &p, "A").await;
    let b = task(&svc, &p, "B").await;

    let moved = svc
        .move_task(MoveTask {
            task_id: b.task.id.clone(),
            new_status: TaskStatus::Backlog,
            new_position: Some(50),
        })
        .await
        .unwrap();

    assert_eq!(moved.task.position, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_move_rejects_negative_position(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    let t = task(&svc, &p, "T").await;

    let result = svc
        .move_task(MoveTask {
            task_id: t.task.id.clone(),
            new_status: TaskStatus::Todo,
            new_position: Some(-1),
        })
        .await;
    assert_matches!(result, Err(ServiceError::Core(CoreError::Validation(_))));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_move_missing_task_is_not_found(pool: SqlitePool) {
    let svc = service(pool);
    let result = svc
        .move_task(MoveTask {
            task_id: "nope".into(),
            new_status: TaskStatus::Todo,
            new_position: Some(0),
        })
        .await;
    assert_matches!(
        result,
        Err(ServiceError::Core(CoreError::NotFound { entity: "Task", .. }))
    );
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_missing_task_is_silent(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;

    let deleted = svc.delete_task("nope").await.unwrap();
    assert!(!deleted);
    assert!(svc.list_activity(&ActivityQuery::default()).await.unwrap().is_empty());
    assert!(project_activity(&svc, &p).await.is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_record_survives_cascade(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    let t = task(&svc, &p, "Doomed").await;

    assert!(svc.delete_task(&t.task.id).await.unwrap());

    let entries = project_activity(&svc, &p).await;
    assert_eq!(actions(&entries), ["task_deleted"], "task_created cascades away");
    assert_eq!(entries[0].task_id, None);

    assert_matches!(
        svc.get_task(&t.task.id).await,
        Err(ServiceError::Core(CoreError::NotFound { .. }))
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_failed_activity_write_keeps_task_change(pool: SqlitePool) {
    sqlx::query(
        "CREATE TRIGGER reject_activity BEFORE INSERT ON activity_log \
         BEGIN SELECT RAISE(ABORT, 'activity log unavailable'); END",
    )
    .execute(&pool)
    .await
    .unwrap();
    let svc = service(pool);
    let p = project(&svc, "P").await;

    let created = task_in(&svc, &p, "Resilient", TaskStatus::Todo).await;
    assert_eq!(created.task.position, 0);

    let update = UpdateTask {
        status: Some(TaskStatus::Done),
        priority: Some(TaskPriority::Critical),
        ..Default::default()
    };
    let updated = svc.update_task(&created.task.id, update).await.unwrap();
    assert_eq!(updated.task.status, TaskStatus::Done);
    assert_eq!(updated.task.priority, TaskPriority::Critical);

    let fetched = svc.get_task(&created.task.id).await.unwrap();
    assert_eq!(fetched.task.status, TaskStatus::Done);

    assert!(svc.delete_task(&created.task.id).await.unwrap());
    assert_matches!(
        svc.get_task(&created.task.id).await,
        Err(ServiceError::Core(CoreError::NotFound { .. }))
    );
    assert!(project_activity(&svc, &p).await.is_empty());
}

// ---------------------------------------------------------------------------
// Search and attribution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_search_matches_title_substring(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    let other = project(&svc, "Other").await;
    task(&svc, &p, "Refactor parser").await;
    task(&svc, &p, "Write docs").await;
    task(&svc, &other, "Parser tests").await;

    let all = svc.search_tasks("PARSER", None).await.unwrap();
    assert_eq!(all.len(), 2);

    let scoped = svc.search_tasks("parser", Some(&p)).await.unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].title, "Refactor parser");

    assert_matches!(
        svc.search_tasks("  ", None).await,
        Err(ServiceError::Core(CoreError::Validation(_)))
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_agent_handle_attributes_writes(pool: SqlitePool) {
    let svc = service(pool);
    let agent = svc.with_actor(ACTOR_AGENT);
    let p = project(&svc, "P").await;

    task(&agent, &p, "From agent").await;

    let entries = project_activity(&svc, &p).await;
    assert_eq!(entries[0].actor.as_deref(), Some(ACTOR_AGENT));
}
