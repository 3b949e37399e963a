//! In-process serialization of explicit reorders per column.

use std::collections::HashMap;
use std::sync::Arc;

use kanban_core::task::TaskStatus;
use kanban_core::types::DbId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per `(project_id, status)` column, created on first use.
///
/// Holding the guard serializes shift-then-set sequences aimed at the same
/// column; different columns never contend. Entries nobody holds or waits on
/// are dropped on the next acquire, so columns of deleted projects do not
/// accumulate.
#[derive(Default)]
pub struct ColumnLocks {
    columns: Mutex<HashMap<(DbId, TaskStatus), Arc<Mutex<()>>>>,
}

impl ColumnLocks {
    /// Create an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a column.
    pub async fn acquire(&self, project_id: &str, status: TaskStatus) -> OwnedMutexGuard<()> {
        let lock = {
            let mut columns = self.columns.lock().await;
            // Clones only happen under this lock, so a count of one means idle.
            columns.retain(|_, lock| Arc::strong_count(lock) > 1);
            columns
                .entry((project_id.to_string(), status))
                .or_default()
                .clone()
        };
        lock.lock_owned().await
    }

    /// Number of columns currently tracked.
    pub async fn column_count(&self) -> usize {
        self.columns.lock().await.len()
    }
}
