//! In-memory persistence for tasks, users, and comments.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Comment, CommentId, NewComment, NewTask, Task, TaskId, TaskPatch, User},
    ports::{
        CommentRepository, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
        UserDirectory,
    },
};

/// Thread-safe in-memory store implementing every persistence port.
///
/// Tasks and comments are kept in insertion order. Deleting a task also
/// deletes its comments.
#[derive(Debug)]
pub struct InMemoryTaskStore<C> {
    state: Arc<RwLock<InMemoryState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryTaskStore<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryState {
    tasks: Vec<Task>,
    users: Vec<User>,
    comments: Vec<Comment>,
}

impl InMemoryState {
    fn task_mut(&mut self, id: TaskId) -> TaskRepositoryResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    fn contains_task(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id() == id)
    }

    /// Removes the listed tasks and their comments, returning how many
    /// tasks were removed.
    fn remove_tasks(&mut self, ids: &[TaskId]) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !ids.contains(&task.id()));
        self.comments
            .retain(|comment| !ids.contains(&comment.task_id()));
        before.saturating_sub(self.tasks.len())
    }
}

impl<C> InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store stamping records with `clock`.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryState::default())),
            clock,
        }
    }

    /// Seeds the store with already persisted tasks.
    #[must_use]
    pub fn with_tasks(self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.write().tasks.extend(tasks);
        self
    }

    /// Seeds the user directory.
    #[must_use]
    pub fn with_users(self, users: impl IntoIterator<Item = User>) -> Self {
        self.write().users.extend(users);
        self
    }

    /// Seeds stored comments.
    #[must_use]
    pub fn with_comments(self, comments: impl IntoIterator<Item = Comment>) -> Self {
        self.write().comments.extend(comments);
        self
    }

    // A panic while holding the lock leaves plain collections behind, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, InMemoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<C> TaskRepository for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn fetch_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        Ok(self.read().tasks.clone())
    }

    async fn create(&self, new_task: &NewTask) -> TaskRepositoryResult<Task> {
        let task = new_task.clone().into_task(TaskId::new(), self.clock.utc());
        self.write().tasks.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRepositoryResult<Task> {
        let mut state = self.write();
        let task = state.task_mut(id)?;
        task.apply_patch(patch, &*self.clock);
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write();
        if state.remove_tasks(&[id]) == 0 {
            return Err(TaskRepositoryError::NotFound(id));
        }
        Ok(())
    }

    async fn bulk_delete(&self, ids: &[TaskId]) -> TaskRepositoryResult<usize> {
        Ok(self.write().remove_tasks(ids))
    }
}

#[async_trait]
impl<C> UserDirectory for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn fetch_users(&self) -> TaskRepositoryResult<Vec<User>> {
        Ok(self.read().users.clone())
    }
}

#[async_trait]
impl<C> CommentRepository for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn list_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Comment>> {
        let state = self.read();
        Ok(state
            .comments
            .iter()
            .filter(|comment| comment.task_id() == task_id)
            .cloned()
            .collect())
    }

    async fn add(&self, new_comment: &NewComment) -> TaskRepositoryResult<Comment> {
        let mut state = self.write();
        if !state.contains_task(new_comment.task_id()) {
            return Err(TaskRepositoryError::NotFound(new_comment.task_id()));
        }
        let comment = Comment::from_new(new_comment.clone(), CommentId::new(), self.clock.utc());
        state.comments.push(comment.clone());
        Ok(comment)
    }
}
