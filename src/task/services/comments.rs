//! Service layer for task comments.

use crate::task::{
    domain::{Comment, NewComment, TaskId, UserId},
    ports::CommentRepository,
};
use std::sync::Arc;
use tracing::debug;

use super::TaskWorkflowResult;

/// Lists and adds task comments.
#[derive(Clone)]
pub struct TaskCommentService<R>
where
    R: CommentRepository,
{
    repository: Arc<R>,
}

impl<R> TaskCommentService<R>
where
    R: CommentRepository,
{
    /// Creates a new comment service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the comments of a task in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskWorkflowError::Repository`] when the lookup
    /// fails.
    pub async fn list(&self, task_id: TaskId) -> TaskWorkflowResult<Vec<Comment>> {
        Ok(self.repository.list_for_task(task_id).await?)
    }

    /// Adds a comment to a task.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskWorkflowError::Domain`] for blank content and
    /// [`super::TaskWorkflowError::Repository`] when the task does not exist
    /// or storage fails.
    pub async fn add(
        &self,
        task_id: TaskId,
        author_id: UserId,
        content: &str,
    ) -> TaskWorkflowResult<Comment> {
        let new_comment = NewComment::new(task_id, author_id, content)?;
        let comment = self.repository.add(&new_comment).await?;
        debug!(task_id = %task_id, comment_id = %comment.id(), "added comment");
        Ok(comment)
    }
}
