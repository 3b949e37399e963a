//! Best-effort activity recording.

use kanban_core::activity::ActivityEvent;
use kanban_db::models::activity::NewActivity;
use kanban_db::repositories::ActivityRepo;
use kanban_db::DbPool;

/// Appends activity entries on behalf of the service.
///
/// Recording never fails the caller: serialization and storage errors are
/// logged and dropped, so the mutation that triggered the event stands.
pub struct ActivityRecorder;

impl ActivityRecorder {
    /// Append one entry. Returns `true` if it was written.
    pub async fn record(
        pool: &DbPool,
        task_id: Option<&str>,
        project_id: &str,
        actor: &str,
        event: &ActivityEvent,
    ) -> bool {
        let details = match event.details_json() {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    action = event.action(),
                    project_id,
                    "Failed to serialize activity details"
                );
                return false;
            }
        };

        let entry = NewActivity {
            task_id,
            project_id: Some(project_id),
            action: event.action(),
            details,
            actor,
        };

        match ActivityRepo::insert(pool, &entry).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    action = event.action(),
                    task_id,
                    project_id,
                    "Failed to record activity"
                );
                false
            }
        }
    }

    /// Append several entries in order.
    pub async fn record_all(
        pool: &DbPool,
        task_id: Option<&str>,
        project_id: &str,
        actor: &str,
        events: &[ActivityEvent],
    ) {
        for event in events {
            Self::record(pool, task_id, project_id, actor, event).await;
        }
    }
}
