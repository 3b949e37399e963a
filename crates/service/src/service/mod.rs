use std::sync::Arc;

use kanban_core::activity::ACTOR_USER;
use kanban_core::error::CoreError;
use kanban_db::models::project::Project;
use kanban_db::models::task::Task;
use kanban_db::repositories::{ProjectRepo, TaskRepo};
use kanban_db::DbPool;

use crate::error::ServiceResult;
use crate::locks::ColumnLocks;

mod comments;
mod labels;
mod projects;
mod tasks;
pub(crate) mod views;

/// Entry point for every board operation.
///
/// Cheap to clone; clones share the pool and the column locks. Each handle
/// carries the actor name written to activity entries and used as the
/// default comment author.
#[derive(Clone)]
pub struct KanbanService {
    pool: DbPool,
    actor: &'static str,
    locks: Arc<ColumnLocks>,
}

impl KanbanService {
    /// Service acting on behalf of the interactive user.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            actor: ACTOR_USER,
            locks: Arc::new(ColumnLocks::new()),
        }
    }

    /// A handle sharing this service's pool and locks but attributing writes
    /// to `actor`.
    pub fn with_actor(&self, actor: &'static str) -> Self {
        Self {
            pool: self.pool.clone(),
            actor,
            locks: Arc::clone(&self.locks),
        }
    }

    pub fn actor(&self) -> &'static str {
        self.actor
    }

    // -----------------------------------------------------------------------
    // Lookups shared by the operation modules
    // -----------------------------------------------------------------------

    async fn require_project(&self, id: &str) -> ServiceResult<Project> {
        ProjectRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::not_found("Project", id).into())
    }

    async fn require_project_exists(&self, id: &str) -> ServiceResult<()> {
        if ProjectRepo::exists(&self.pool, id).await? {
            Ok(())
        } else {
            Err(CoreError::not_found("Project", id).into())
        }
    }

    async fn require_task(&self, id: &str) -> ServiceResult<Task> {
        TaskRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::not_found("Task", id).into())
    }
}

/// Treat a blank optional filter the same as an absent one.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
