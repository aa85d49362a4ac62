//! Repository port for task persistence.

use crate::task::domain::{NewTask, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// The repository owns identifier and timestamp assignment: it stamps
/// `created_at`/`updated_at` on creation and refreshes `updated_at` on every
/// update.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every stored task in storage order.
    async fn fetch_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Stores a new task and returns it with its assigned identifier and
    /// timestamps.
    async fn create(&self, new_task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Applies a partial update and returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRepositoryResult<Task>;

    /// Deletes a task together with its comments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Deletes every listed task together with its comments and returns the
    /// number of tasks removed. Unknown identifiers are ignored.
    async fn bulk_delete(&self, ids: &[TaskId]) -> TaskRepositoryResult<usize>;
}

/// Errors returned by task persistence implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The request did not complete in time.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
