//! Repository port for task comments.

use super::TaskRepositoryResult;
use crate::task::domain::{Comment, NewComment, TaskId};
use async_trait::async_trait;

/// Comment persistence contract.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Returns the comments of a task in insertion order.
    async fn list_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Comment>>;

    /// Stores a comment and returns it with its assigned identifier and
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRepositoryError::NotFound`] when the owning task
    /// does not exist.
    async fn add(&self, new_comment: &NewComment) -> TaskRepositoryResult<Comment>;
}
