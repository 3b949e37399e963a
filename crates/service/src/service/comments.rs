use kanban_core::error::CoreError;
use kanban_core::validation::{or_default_text, require_text};
use kanban_db::models::comment::{Comment, CreateComment};
use kanban_db::repositories::CommentRepo;

use super::KanbanService;
use crate::error::ServiceResult;

impl KanbanService {
    /// Comments on a task, newest first.
    pub async fn list_comments(&self, task_id: &str) -> ServiceResult<Vec<Comment>> {
        self.require_task(task_id).await?;
        Ok(CommentRepo::list_by_task(&self.pool, task_id).await?)
    }

    /// Add a comment. The author defaults to the acting client.
    pub async fn add_comment(&self, task_id: &str, input: CreateComment) -> ServiceResult<Comment> {
        require_text(&input.content, "content")?;
        self.require_task(task_id).await?;

        let author = or_default_text(input.author.as_deref(), self.actor);
        let comment = CommentRepo::create(&self.pool, task_id, &input.content, &author).await?;
        tracing::info!(comment_id = %comment.id, task_id, author = %author, "Comment added");
        Ok(comment)
    }

    pub async fn delete_comment(&self, id: &str) -> ServiceResult<()> {
        if !CommentRepo::delete(&self.pool, id).await? {
            return Err(CoreError::not_found("Comment", id).into());
        }
        tracing::info!(comment_id = %id, "Comment deleted");
        Ok(())
    }
}
