//! Read-side aggregates for the dashboard and analytics views.

use std::collections::BTreeMap;

use kanban_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::activity::ActivityLog;

/// A `(key, count)` pair from a `GROUP BY` query.
#[derive(Debug, Clone, FromRow)]
pub struct GroupCount {
    pub key: String,
    pub count: i64,
}

/// An activity entry joined with the current task title and project name.
///
/// Either name is `None` when the referenced row no longer exists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentActivity {
    pub id: DbId,
    pub action: String,
    pub details: Option<String>,
    pub task_title: Option<String>,
    pub project_name: Option<String>,
    pub created_at: Timestamp,
}

/// Board-wide counts plus the latest activity.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_projects: i64,
    pub total_tasks: i64,
    pub tasks_by_status: BTreeMap<String, i64>,
    pub tasks_by_priority: BTreeMap<String, i64>,
    pub recent_activity: Vec<RecentActivity>,
}

/// Number of events on one calendar day (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct DailyCount {
    pub date: String,
    pub count: i64,
}

/// Completion figures for one project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectProgress {
    pub project_id: DbId,
    pub project_name: Option<String>,
    pub total: i64,
    pub done: i64,
    pub in_progress: i64,
}

/// Trends over the analytics window.
#[derive(Debug, Clone, Serialize)]
pub struct Analytics {
    pub created_trend: Vec<DailyCount>,
    pub completed_trend: Vec<DailyCount>,
    pub tasks_per_project: Vec<ProjectProgress>,
    pub recent_completions: Vec<ActivityLog>,
}
