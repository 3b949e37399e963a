use kanban_core::activity::{status_transition, update_events, ActivityEvent, TaskSnapshot};
use kanban_core::error::CoreError;
use kanban_core::search::{like_pattern, normalize_keyword, SEARCH_LIMIT};
use kanban_core::task::DEFAULT_TASK_TITLE;
use kanban_core::validation::{or_default_text, require_id, require_text, validate_position};
use kanban_db::models::task::{
    CreateTask, MoveTask, NewTask, Task, TaskFilter, TaskWithLabels, UpdateTask,
};
use kanban_db::repositories::{PositionAllocator, TaskRepo};

use super::{non_blank, KanbanService};
use crate::activity::ActivityRecorder;
use crate::error::ServiceResult;

impl KanbanService {
    /// Create a task at the end of its column and record `task_created`.
    ///
    /// `project_id` is required and must resolve. A parent task, when given,
    /// must belong to the same project. Status defaults to `backlog`,
    /// priority to `medium` and a blank title to "Untitled Task".
    pub async fn create_task(&self, input: CreateTask) -> ServiceResult<TaskWithLabels> {
        let project_id = require_id(input.project_id.as_deref(), "project_id")?;
        self.require_project_exists(&project_id).await?;

        let parent_task_id = match non_blank(input.parent_task_id.as_deref()) {
            Some(parent_id) => {
                let parent = self.require_task(parent_id).await?;
                if parent.project_id != project_id {
                    return Err(CoreError::Validation(
                        "parent_task_id must reference a task in the same project".into(),
                    )
                    .into());
                }
                Some(parent.id)
            }
            None => None,
        };

        let new_task = NewTask {
            project_id,
            parent_task_id,
            title: or_default_text(input.title.as_deref(), DEFAULT_TASK_TITLE),
            description: input.description.unwrap_or_default(),
            status: input.status.unwrap_or_default(),
            priority: input.priority.unwrap_or_default(),
            assignee: input.assignee,
            due_date: input.due_date,
        };

        let task = TaskRepo::create(&self.pool, &new_task).await?;

        ActivityRecorder::record(
            &self.pool,
            Some(&task.id),
            &task.project_id,
            self.actor,
            &ActivityEvent::TaskCreated {
                title: task.title.clone(),
            },
        )
        .await;

        tracing::info!(
            task_id = %task.id,
            project_id = %task.project_id,
            status = %task.status,
            position = task.position,
            actor = self.actor,
            "Task created"
        );
        Ok(TaskWithLabels::bare(task))
    }

    /// A single task with labels, subtask progress and comment count.
    pub async fn get_task(&self, id: &str) -> ServiceResult<TaskWithLabels> {
        let task = self.require_task(id).await?;
        self.enrich_one(task).await
    }

    /// A project's tasks in board order, optionally filtered by status and
    /// priority.
    pub async fn list_tasks(
        &self,
        project_id: Option<&str>,
        filter: TaskFilter,
    ) -> ServiceResult<Vec<TaskWithLabels>> {
        let project_id = require_id(project_id, "project_id")?;
        self.require_project_exists(&project_id).await?;

        let tasks = TaskRepo::list_by_project(&self.pool, &project_id, &filter).await?;
        Ok(TaskRepo::enrich(&self.pool, tasks).await?)
    }

    /// Apply a partial update.
    ///
    /// A status change moves the task to the end of the destination column
    /// and records `status_changed`; a priority change records
    /// `priority_changed`. Setting a field to its current value records
    /// nothing.
    pub async fn update_task(&self, id: &str, input: UpdateTask) -> ServiceResult<TaskWithLabels> {
        if let Some(title) = &input.title {
            require_text(title, "title")?;
        }

        let existing = self.require_task(id).await?;
        let snapshot = TaskSnapshot {
            title: &existing.title,
            status: existing.status,
            priority: existing.priority,
        };
        let events = update_events(&snapshot, input.status, input.priority);

        let task = TaskRepo::update(&self.pool, id, &input)
            .await?
            .ok_or_else(|| CoreError::not_found("Task", id))?;

        ActivityRecorder::record_all(
            &self.pool,
            Some(&task.id),
            &task.project_id,
            self.actor,
            &events,
        )
        .await;

        tracing::info!(
            task_id = %task.id,
            status = %task.status,
            position = task.position,
            events = events.len(),
            actor = self.actor,
            "Task updated"
        );
        self.enrich_one(task).await
    }

    /// Delete a task. Returns `false` without side effects when it does not
    /// exist.
    ///
    /// The `task_deleted` entry is written first and references only the
    /// project, so the cascade that follows leaves it in place.
    pub async fn delete_task(&self, id: &str) -> ServiceResult<bool> {
        let Some(task) = TaskRepo::find_by_id(&self.pool, id).await? else {
            return Ok(false);
        };

        ActivityRecorder::record(
            &self.pool,
            None,
            &task.project_id,
            self.actor,
            &ActivityEvent::TaskDeleted {
                title: task.title.clone(),
            },
        )
        .await;

        let deleted = TaskRepo::delete(&self.pool, id).await?;
        tracing::info!(task_id = %id, project_id = %task.project_id, deleted, "Task deleted");
        Ok(deleted)
    }

    /// Move a task between or within columns.
    ///
    /// Without `new_position` the task is appended to the destination column.
    /// With one, every task at or after that rank shifts right and the task
    /// takes the freed slot; the source column is not compacted. A rank past
    /// the end of the column is clamped to the append rank. Reorders on the
    /// same column are serialized in-process and run in one transaction.
    pub async fn move_task(&self, input: MoveTask) -> ServiceResult<TaskWithLabels> {
        if let Some(position) = input.new_position {
            validate_position(position)?;
        }

        let existing = self.require_task(&input.task_id).await?;
        let moved = match input.new_position {
            None => TaskRepo::append_to(&self.pool, &existing.id, input.new_status).await?,
            Some(position) => {
                let _column = self
                    .locks
                    .acquire(&existing.project_id, input.new_status)
                    .await;
                let mut tx = self.pool.begin().await?;
                let end = PositionAllocator::next_position(
                    &mut *tx,
                    &existing.project_id,
                    input.new_status,
                    Some(&existing.id),
                )
                .await?;
                let position = position.min(end);
                PositionAllocator::shift_from(
                    &mut *tx,
                    &existing.project_id,
                    input.new_status,
                    position,
                )
                .await?;
                let moved =
                    TaskRepo::place_at(&mut *tx, &existing.id, input.new_status, position).await?;
                if moved.is_some() {
                    tx.commit().await?;
                }
                moved
            }
        };
        let moved = moved.ok_or_else(|| CoreError::not_found("Task", &input.task_id))?;

        let snapshot = TaskSnapshot {
            title: &existing.title,
            status: existing.status,
            priority: existing.priority,
        };
        if let Some(event) = status_transition(&snapshot, moved.status) {
            ActivityRecorder::record(
                &self.pool,
                Some(&moved.id),
                &moved.project_id,
                self.actor,
                &event,
            )
            .await;
        }

        tracing::info!(
            task_id = %moved.id,
            from = %existing.status,
            to = %moved.status,
            position = moved.position,
            actor = self.actor,
            "Task moved"
        );

        let current = self.require_task(&moved.id).await?;
        self.enrich_one(current).await
    }

    /// Tasks whose title contains `query`, case-insensitively, most recently
    /// updated first.
    pub async fn search_tasks(
        &self,
        query: &str,
        project_id: Option<&str>,
    ) -> ServiceResult<Vec<Task>> {
        let keyword = normalize_keyword(query)?;
        let tasks = TaskRepo::search(
            &self.pool,
            &like_pattern(keyword),
            non_blank(project_id),
            SEARCH_LIMIT,
        )
        .await?;
        Ok(tasks)
    }

    async fn enrich_one(&self, task: Task) -> ServiceResult<TaskWithLabels> {
        let id = task.id.clone();
        TaskRepo::enrich(&self.pool, vec![task])
            .await?
            .pop()
            .ok_or_else(|| CoreError::not_found("Task", id).into())
    }
}
