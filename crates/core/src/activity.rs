//! Activity log events and the rules for when they fire.
//!
//! Each event is a typed variant; it is flattened into an `action` string and
//! a JSON `details` payload only when written to the `activity_log` table.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::task::{TaskPriority, TaskStatus};

// ---------------------------------------------------------------------------
// Actors
// ---------------------------------------------------------------------------

/// Actor recorded for changes made through the HTTP API.
pub const ACTOR_USER: &str = "user";

/// Actor recorded for changes made through the agent tool layer.
pub const ACTOR_AGENT: &str = "mcp-agent";

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Default number of entries returned by an activity listing.
pub const DEFAULT_ACTIVITY_LIMIT: i64 = 30;

/// Upper bound for an activity listing.
pub const MAX_ACTIVITY_LIMIT: i64 = 200;

/// Number of entries shown in the dashboard feed.
pub const DASHBOARD_ACTIVITY_LIMIT: i64 = 20;

/// Clamp a caller-supplied limit into `1..=MAX_ACTIVITY_LIMIT`.
pub fn clamp_activity_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
        .clamp(1, MAX_ACTIVITY_LIMIT)
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

pub const TASK_CREATED: &str = "task_created";
pub const STATUS_CHANGED: &str = "status_changed";
pub const PRIORITY_CHANGED: &str = "priority_changed";
pub const TASK_DELETED: &str = "task_deleted";

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A task lifecycle or field-change event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "details", rename_all = "snake_case")]
pub enum ActivityEvent {
    TaskCreated {
        title: String,
    },
    StatusChanged {
        from: TaskStatus,
        to: TaskStatus,
        title: String,
    },
    PriorityChanged {
        from: TaskPriority,
        to: TaskPriority,
        title: String,
    },
    TaskDeleted {
        title: String,
    },
}

impl ActivityEvent {
    /// Value for the `action` column.
    pub fn action(&self) -> &'static str {
        match self {
            ActivityEvent::TaskCreated { .. } => TASK_CREATED,
            ActivityEvent::StatusChanged { .. } => STATUS_CHANGED,
            ActivityEvent::PriorityChanged { .. } => PRIORITY_CHANGED,
            ActivityEvent::TaskDeleted { .. } => TASK_DELETED,
        }
    }

    /// Serialize the payload for the `details` column.
    pub fn details_json(&self) -> Result<String, CoreError> {
        let mut tagged =
            serde_json::to_value(self).map_err(|e| CoreError::Internal(e.to_string()))?;
        let details = tagged
            .get_mut("details")
            .map(Value::take)
            .unwrap_or(Value::Null);
        Ok(details.to_string())
    }

    /// Rebuild an event from its stored `action` and `details` columns.
    pub fn from_stored(action: &str, details: &str) -> Result<Self, CoreError> {
        let details: Value = serde_json::from_str(details)
            .map_err(|e| CoreError::Validation(format!("Malformed activity details: {e}")))?;
        serde_json::from_value(serde_json::json!({ "action": action, "details": details }))
            .map_err(|e| CoreError::Validation(format!("Unrecognised activity entry: {e}")))
    }
}

/// The state of a task before an update, as far as activity rules care.
#[derive(Debug, Clone, Copy)]
pub struct TaskSnapshot<'a> {
    pub title: &'a str,
    pub status: TaskStatus,
    pub priority: TaskPriority,
}

/// `StatusChanged` when `to` differs from the snapshot, otherwise nothing.
pub fn status_transition(before: &TaskSnapshot<'_>, to: TaskStatus) -> Option<ActivityEvent> {
    (before.status != to).then(|| ActivityEvent::StatusChanged {
        from: before.status,
        to,
        title: before.title.to_string(),
    })
}

/// Events fired by a partial update.
///
/// Status and priority are evaluated independently, so an update can yield
/// zero, one or two events. Fields that are absent or equal to the current
/// value fire nothing.
pub fn update_events(
    before: &TaskSnapshot<'_>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
) -> Vec<ActivityEvent> {
    let mut events = Vec::with_capacity(2);
    if let Some(event) = status.and_then(|to| status_transition(before, to)) {
        events.push(event);
    }
    if let Some(to) = priority.filter(|p| *p != before.priority) {
        events.push(ActivityEvent::PriorityChanged {
            from: before.priority,
            to,
            title: before.title.to_string(),
        });
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> TaskSnapshot<'static> {
        TaskSnapshot {
            title: "Write docs",
            status: TaskStatus::Backlog,
            priority: TaskPriority::Medium,
        }
    }

    #[test]
    fn same_status_fires_nothing() {
        let events = update_events(&snapshot(), Some(TaskStatus::Backlog), None);
        assert!(events.is_empty());
    }

    #[test]
    fn status_change_uses_pre_update_values() {
        let events = update_events(&snapshot(), Some(TaskStatus::Done), None);
        assert_eq!(
            events,
            vec![ActivityEvent::StatusChanged {
                from: TaskStatus::Backlog,
                to: TaskStatus::Done,
                title: "Write docs".into(),
            }]
        );
    }

    #[test]
    fn status_and_priority_fire_independently() {
        let events = update_events(
            &snapshot(),
            Some(TaskStatus::Todo),
            Some(TaskPriority::Critical),
        );
        let actions: Vec<_> = events.iter().map(ActivityEvent::action).collect();
        assert_eq!(actions, vec![STATUS_CHANGED, PRIORITY_CHANGED]);
    }

    #[test]
    fn same_priority_fires_nothing() {
        assert!(update_events(&snapshot(), None, Some(TaskPriority::Medium)).is_empty());
    }

    #[test]
    fn details_hold_only_the_payload() {
        let event = ActivityEvent::StatusChanged {
            from: TaskStatus::Backlog,
            to: TaskStatus::InProgress,
            title: "T".into(),
        };
        let details: Value = serde_json::from_str(&event.details_json().unwrap()).unwrap();
        assert_eq!(
            details,
            serde_json::json!({ "from": "backlog", "to": "in_progress", "title": "T" })
        );
    }

    #[test]
    fn created_details_carry_title() {
        let event = ActivityEvent::TaskCreated { title: "New".into() };
        assert_eq!(event.details_json().unwrap(), r#"{"title":"New"}"#);
        assert_eq!(event.action(), TASK_CREATED);
    }

    #[test]
    fn stored_entry_is_parsed_back() {
        let event = ActivityEvent::from_stored(
            PRIORITY_CHANGED,
            r#"{"from":"low","to":"high","title":"X"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            ActivityEvent::PriorityChanged {
                from: TaskPriority::Low,
                to: TaskPriority::High,
                title: "X".into(),
            }
        );
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(ActivityEvent::from_stored("project_renamed", r#"{"title":"X"}"#).is_err());
        assert!(ActivityEvent::from_stored(TASK_CREATED, "not json").is_err());
    }

    #[test]
    fn activity_limit_is_clamped() {
        assert_eq!(clamp_activity_limit(None), DEFAULT_ACTIVITY_LIMIT);
        assert_eq!(clamp_activity_limit(Some(0)), 1);
        assert_eq!(clamp_activity_limit(Some(10_000)), MAX_ACTIVITY_LIMIT);
        assert_eq!(clamp_activity_limit(Some(5)), 5);
    }
}
