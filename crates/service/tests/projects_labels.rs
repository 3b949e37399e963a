//! Service-level tests for projects, labels and comments.

mod common;

use assert_matches::assert_matches;
use kanban_core::activity::ACTOR_AGENT;
use kanban_core::error::CoreError;
use kanban_db::models::comment::CreateComment;
use kanban_db::models::label::{CreateLabel, UpdateLabel};
use kanban_db::models::project::{CreateProject, UpdateProject};
use kanban_service::ServiceError;
use sqlx::SqlitePool;

use common::*;

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_project_defaults_and_counts(pool: SqlitePool) {
    let svc = service(pool);

    let unnamed = svc.create_project(CreateProject::default()).await.unwrap();
    assert_eq!(unnamed.name, "Untitled Project");

    task(&svc, &unnamed.id, "A").await;
    task(&svc, &unnamed.id, "B").await;
    project(&svc, "Empty").await;

    let listed = svc.list_projects().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].project.id, unnamed.id);
    assert_eq!(listed[0].task_count, 2);
    assert_eq!(listed[1].task_count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_project_update_refreshes_timestamp(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "Before").await;
    let original = svc.get_project(&p).await.unwrap();

    let input = UpdateProject {
        name: Some("After".into()),
        repo_url: Some(Some("https://example.com/repo.git".into())),
        ..Default::default()
    };
    let updated = svc.update_project(&p, input).await.unwrap();

    assert_eq!(updated.name, "After");
    assert_eq!(updated.repo_url.as_deref(), Some("https://example.com/repo.git"));
    assert!(updated.updated_at >= original.updated_at);

    let cleared = svc
        .update_project(
            &p,
            UpdateProject {
                repo_url: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.repo_url, None);
    assert_eq!(cleared.name, "After");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_project_delete_cascades(pool: SqlitePool) {
    let svc = service(pool.clone());
    let p = project(&svc, "Doomed").await;
    let t = task(&svc, &p, "Task").await;
    let label = svc
        .create_label(&p, CreateLabel::default())
        .await
        .unwrap();
    svc.assign_label(&t.task.id, &label.id).await.unwrap();
    svc.add_comment(
        &t.task.id,
        CreateComment {
            content: "note".into(),
            author: None,
        },
    )
    .await
    .unwrap();

    svc.delete_project(&p).await.unwrap();

    for table in ["tasks", "labels", "task_labels", "comments", "activity_log"] {
        assert_eq!(count(&pool, table).await, 0, "{table} should be empty");
    }
    assert_matches!(
        svc.delete_project(&p).await,
        Err(ServiceError::Core(CoreError::NotFound { entity: "Project", .. }))
    );
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_label_defaults_and_update(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;

    let label = svc.create_label(&p, CreateLabel::default()).await.unwrap();
    assert_eq!(label.name, "Label");
    assert_eq!(label.color, "#6366f1");

    let updated = svc
        .update_label(
            &label.id,
            UpdateLabel {
                name: Some("bug".into()),
                color: Some("#ef4444".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "bug");
    assert_eq!(updated.color, "#ef4444");

    let bad = svc
        .update_label(
            &label.id,
            UpdateLabel {
                name: None,
                color: Some("red".into()),
            },
        )
        .await;
    assert_matches!(bad, Err(ServiceError::Core(CoreError::Validation(_))));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_assign_is_idempotent(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    let t = task(&svc, &p, "T").await;
    let label = svc.create_label(&p, CreateLabel::default()).await.unwrap();

    assert!(svc.assign_label(&t.task.id, &label.id).await.unwrap());
    assert!(!svc.assign_label(&t.task.id, &label.id).await.unwrap());

    let enriched = svc.get_task(&t.task.id).await.unwrap();
    assert_eq!(enriched.labels.len(), 1);

    assert!(svc.unassign_label(&t.task.id, &label.id).await.unwrap());
    assert!(!svc.unassign_label(&t.task.id, &label.id).await.unwrap());
    assert!(svc.get_task(&t.task.id).await.unwrap().labels.is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_assign_rejects_unknown_or_foreign_label(pool: SqlitePool) {
    let svc = service(pool);
    let p1 = project(&svc, "One").await;
    let p2 = project(&svc, "Two").await;
    let t = task(&svc, &p1, "T").await;
    let foreign = svc.create_label(&p2, CreateLabel::default()).await.unwrap();

    assert_matches!(
        svc.assign_label(&t.task.id, "missing").await,
        Err(ServiceError::Core(CoreError::NotFound { entity: "Label", .. }))
    );
    assert_matches!(
        svc.assign_label("missing", &foreign.id).await,
        Err(ServiceError::Core(CoreError::NotFound { entity: "Task", .. }))
    );
    assert_matches!(
        svc.assign_label(&t.task.id, &foreign.id).await,
        Err(ServiceError::Core(CoreError::Validation(_)))
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_label_delete_detaches(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    let t = task(&svc, &p, "T").await;
    let label = svc.create_label(&p, CreateLabel::default()).await.unwrap();
    svc.assign_label(&t.task.id, &label.id).await.unwrap();

    svc.delete_label(&label.id).await.unwrap();

    assert!(svc.get_task(&t.task.id).await.unwrap().labels.is_empty());
    assert!(svc.list_labels(&p).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_comments_newest_first_with_actor_author(pool: SqlitePool) {
    let svc = service(pool);
    let agent = svc.with_actor(ACTOR_AGENT);
    let p = project(&svc, "P").await;
    let t = task(&svc, &p, "T").await;

    svc.add_comment(
        &t.task.id,
        CreateComment {
            content: "first".into(),
            author: Some("alex".into()),
        },
    )
    .await
    .unwrap();
    agent
        .add_comment(
            &t.task.id,
            CreateComment {
                content: "second".into(),
                author: None,
            },
        )
        .await
        .unwrap();

    let comments = svc.list_comments(&t.task.id).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "second");
    assert_eq!(comments[0].author.as_deref(), Some(ACTOR_AGENT));
    assert_eq!(comments[1].author.as_deref(), Some("alex"));

    assert_eq!(svc.get_task(&t.task.id).await.unwrap().comment_count, 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_comment_validation_and_delete(pool: SqlitePool) {
    let svc = service(pool);
    let p = project(&svc, "P").await;
    let t = task(&svc, &p, "T").await;

    let blank = svc
        .add_comment(
            &t.task.id,
            CreateComment {
                content: "  ".into(),
                author: None,
            },
        )
        .await;
    assert_matches!(blank, Err(ServiceError::Core(CoreError::Validation(_))));

    let comment = svc
        .add_comment(
            &t.task.id,
            CreateComment {
                content: "keep".into(),
                author: None,
            },
        )
        .await
        .unwrap();
    svc.delete_comment(&comment.id).await.unwrap();
    assert_matches!(
        svc.delete_comment(&comment.id).await,
        Err(ServiceError::Core(CoreError::NotFound { entity: "Comment", .. }))
    );
}
