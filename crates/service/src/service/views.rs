use std::collections::BTreeMap;

use chrono::{Days, Utc};
use kanban_core::activity::{clamp_activity_limit, DASHBOARD_ACTIVITY_LIMIT};
use kanban_core::export::to_csv;
use kanban_core::task::{TaskPriority, TaskStatus};
use kanban_db::models::activity::{ActivityLog, ActivityQuery};
use kanban_db::models::dashboard::{Analytics, DashboardSummary, GroupCount};
use kanban_db::repositories::{ActivityRepo, DashboardRepo, ProjectRepo, TaskRepo};

use super::{non_blank, KanbanService};
use crate::error::ServiceResult;

/// Days covered by the created/completed trends, counting back from today.
pub const ANALYTICS_WINDOW_DAYS: u64 = 14;

/// Number of completion events returned by [`KanbanService::analytics`].
pub const RECENT_COMPLETIONS_LIMIT: i64 = 10;

impl KanbanService {
    /// Activity newest first.
    ///
    /// A task filter takes precedence over a project filter; with neither
    /// the feed covers every project. The limit defaults to 30 and is
    /// clamped to `1..=200`.
    pub async fn list_activity(&self, query: &ActivityQuery) -> ServiceResult<Vec<ActivityLog>> {
        let limit = clamp_activity_limit(query.limit);
        let entries = match (
            non_blank(query.task_id.as_deref()),
            non_blank(query.project_id.as_deref()),
        ) {
            (Some(task_id), _) => ActivityRepo::list_for_task(&self.pool, task_id, limit).await?,
            (None, Some(project_id)) => {
                ActivityRepo::list_for_project(&self.pool, project_id, limit).await?
            }
            (None, None) => ActivityRepo::list_recent(&self.pool, limit).await?,
        };
        Ok(entries)
    }

    /// Board-wide totals, per-status and per-priority counts, and the latest
    /// activity with task titles and project names.
    pub async fn dashboard_summary(&self) -> ServiceResult<DashboardSummary> {
        let total_projects = ProjectRepo::count(&self.pool).await?;
        let total_tasks = TaskRepo::count(&self.pool).await?;
        let by_status = DashboardRepo::status_counts(&self.pool).await?;
        let by_priority = DashboardRepo::priority_counts(&self.pool).await?;
        let recent_activity =
            DashboardRepo::recent_activity(&self.pool, DASHBOARD_ACTIVITY_LIMIT).await?;

        Ok(DashboardSummary {
            total_projects,
            total_tasks,
            tasks_by_status: fill_counts(TaskStatus::ALL.iter().map(|s| s.as_str()), by_status),
            tasks_by_priority: fill_counts(
                TaskPriority::ALL.iter().map(|p| p.as_str()),
                by_priority,
            ),
            recent_activity,
        })
    }

    /// Created and completed trends over the last
    /// [`ANALYTICS_WINDOW_DAYS`] days, per-project progress and the latest
    /// completions, optionally limited to one project.
    pub async fn analytics(&self, project_id: Option<&str>) -> ServiceResult<Analytics> {
        let project_id = non_blank(project_id);
        if let Some(project_id) = project_id {
            self.require_project_exists(project_id).await?;
        }

        let since = Utc::now()
            .date_naive()
            .checked_sub_days(Days::new(ANALYTICS_WINDOW_DAYS))
            .unwrap_or_default()
            .format("%Y-%m-%d")
            .to_string();

        Ok(Analytics {
            created_trend: DashboardRepo::created_trend(&self.pool, &since, project_id).await?,
            completed_trend: DashboardRepo::completed_trend(&self.pool, &since, project_id)
                .await?,
            tasks_per_project: DashboardRepo::tasks_per_project(&self.pool, project_id).await?,
            recent_completions: ActivityRepo::recent_completions(
                &self.pool,
                project_id,
                RECENT_COMPLETIONS_LIMIT,
            )
            .await?,
        })
    }

    /// All tasks, or one project's tasks in board order, as CSV text.
    pub async fn export_csv(&self, project_id: Option<&str>) -> ServiceResult<String> {
        let project_id = non_blank(project_id);
        if let Some(project_id) = project_id {
            self.require_project_exists(project_id).await?;
        }

        let rows: Vec<_> = TaskRepo::export_rows(&self.pool, project_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        tracing::info!(project_id, rows = rows.len(), "Tasks exported");
        Ok(to_csv(&rows))
    }
}

/// Counts keyed by every known value, with zero for values that have no rows.
fn fill_counts<'a>(
    keys: impl Iterator<Item = &'a str>,
    counts: Vec<GroupCount>,
) -> BTreeMap<String, i64> {
    let mut filled: BTreeMap<String, i64> = keys.map(|k| (k.to_string(), 0)).collect();
    for GroupCount { key, count } in counts {
        filled.insert(key, count);
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_counts_zero_fills_missing_keys() {
        let counts = vec![GroupCount {
            key: "todo".into(),
            count: 3,
        }];
        let filled = fill_counts(TaskStatus::ALL.iter().map(|s| s.as_str()), counts);

        assert_eq!(filled.len(), TaskStatus::ALL.len());
        assert_eq!(filled["todo"], 3);
        assert_eq!(filled["done"], 0);
    }
}
