//! Service layer for interactive task commands and bulk operations.
//!
//! Every command validates against the domain rules before touching the
//! persistence layer, so a rejected command leaves both the store and the
//! board unchanged. Collaborator failures are recorded on the board as a
//! generic failure message and returned to the caller.

use crate::task::{
    domain::{
        BoardEvent, BulkDeleteOutcome, BulkDeletePlan, BulkStatusOutcome, BulkStatusPlan,
        DueDateBucket, NewTask, Task, TaskBoard, TaskDomainError, TaskId, TaskPatch, TaskPriority,
        TaskStatus, TaskTitle, UserId,
    },
    ports::{BulkDeleteConfirmation, TaskRepository, TaskRepositoryError, UserDirectory},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::WorkflowConfig;

/// Request payload for creating a task from the task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    assignee_id: Option<UserId>,
    due_date: Option<NaiveDate>,
}

impl CreateTaskRequest {
    /// Creates a request for a `todo`, medium-priority task.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::default(),
            assignee_id: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Request payload for editing a task from the task form. Unset fields are
/// left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditTaskRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    assignee_id: Option<Option<UserId>>,
    due_date: Option<Option<NaiveDate>>,
}

impl EditTaskRequest {
    /// Creates an edit request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets or clears the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: Option<UserId>) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        let Self {
            title,
            description,
            status,
            priority,
            assignee_id,
            due_date,
        } = self;

        let mut patch = TaskPatch::new();
        if let Some(raw_title) = title {
            patch = patch.with_title(TaskTitle::new(raw_title)?);
        }
        if let Some(text) = description {
            patch = patch.with_description(text);
        }
        if let Some(next_status) = status {
            patch = patch.with_status(next_status);
        }
        if let Some(next_priority) = priority {
            patch = patch.with_priority(next_priority);
        }
        if let Some(assignee) = assignee_id {
            patch = patch.with_assignee(assignee);
        }
        if let Some(date) = due_date {
            patch = patch.with_due_date(date);
        }
        Ok(patch)
    }
}

/// Service-level errors for workflow operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// Domain validation rejected the command.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The persistence layer failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The task is not loaded on the board.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// Storage failed partway through a bulk status change. The tasks
    /// counted in `outcome` were moved; `unmoved` tasks were not.
    #[error("{outcome} {unmoved} task(s) were not moved because storage failed.")]
    BulkStatusInterrupted {
        /// What was applied before the failure.
        outcome: BulkStatusOutcome,
        /// Number of movable tasks left unmoved.
        unmoved: usize,
        /// The storage failure.
        source: TaskRepositoryError,
    },
}

/// Result type for workflow service operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Orchestrates task commands between the board and the persistence layer.
#[derive(Clone)]
pub struct TaskWorkflowService<R, C>
where
    R: TaskRepository + UserDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: WorkflowConfig,
}

impl<R, C> TaskWorkflowService<R, C>
where
    R: TaskRepository + UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new workflow service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            config: WorkflowConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub const fn with_config(mut self, config: WorkflowConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Replaces the board's tasks with a fresh fetch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the fetch fails; the
    /// board keeps its previous tasks and records the failure.
    pub async fn load_tasks(&self, board: &mut TaskBoard) -> TaskWorkflowResult<()> {
        debug!("loading tasks");
        board.apply(BoardEvent::FetchStarted);
        match self.repository.fetch_all().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "loaded tasks");
                board.apply(BoardEvent::TasksLoaded(tasks));
                Ok(())
            }
            Err(err) => Err(collaborator_failure(
                board,
                err,
                BoardEvent::FetchFailed,
                "Failed to fetch tasks",
            )),
        }
    }

    /// Loads the user directory onto the board.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the fetch fails.
    pub async fn load_users(&self, board: &mut TaskBoard) -> TaskWorkflowResult<()> {
        let users = self.repository.fetch_users().await?;
        debug!(count = users.len(), "loaded users");
        board.apply(BoardEvent::UsersLoaded(users));
        Ok(())
    }

    /// Creates a task from a form submission.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Domain`] for a blank title or a
    /// high-priority task without an assignee, and
    /// [`TaskWorkflowError::Repository`] when storage fails.
    pub async fn create_task(
        &self,
        board: &mut TaskBoard,
        request: CreateTaskRequest,
    ) -> TaskWorkflowResult<Task> {
        let CreateTaskRequest {
            title,
            description,
            status,
            priority,
            assignee_id,
            due_date,
        } = request;

        let new_task = NewTask::new(title)
            .map_err(reject)?
            .with_description(description)
            .with_status(status)
            .with_priority(priority)
            .with_assignee(assignee_id)
            .with_due_date(due_date);
        new_task.validate().map_err(reject)?;

        board.apply(BoardEvent::CreateStarted);
        match self.repository.create(&new_task).await {
            Ok(task) => {
                info!(task_id = %task.id(), title = %task.title(), "created task");
                board.apply(BoardEvent::TaskCreated(task.clone()));
                Ok(task)
            }
            Err(err) => Err(collaborator_failure(
                board,
                err,
                BoardEvent::CreateFailed,
                "Failed to create task",
            )),
        }
    }

    /// Applies a form edit to a loaded task.
    ///
    /// A status change made through the form follows the same transition
    /// rules as the status selector and re-sorts the list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] for unknown tasks,
    /// [`TaskWorkflowError::Domain`] for rule violations, and
    /// [`TaskWorkflowError::Repository`] when storage fails.
    pub async fn edit_task(
        &self,
        board: &mut TaskBoard,
        id: TaskId,
        request: EditTaskRequest,
    ) -> TaskWorkflowResult<Task> {
        let current = find_task(board, id)?;
        let patch = request.into_patch().map_err(reject)?;
        patch.validate_against(&current).map_err(reject)?;
        if let Some(next) = patch.status_change() {
            current
                .clone()
                .transition_to(next, &*self.clock)
                .map_err(reject)?;
        }

        debug!(task_id = %id, "editing task");
        let updated = self.persist_update(board, id, &patch).await?;
        if patch.status_change().is_some() {
            board.apply(BoardEvent::StatusChanged(updated.clone()));
        } else {
            board.apply(BoardEvent::TaskUpdated(updated.clone()));
        }
        Ok(updated)
    }

    /// Moves a single task to `status`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] (wrapped in
    /// [`TaskWorkflowError::Domain`]) when the workflow forbids the move,
    /// without mutating anything.
    pub async fn change_status(
        &self,
        board: &mut TaskBoard,
        id: TaskId,
        status: TaskStatus,
    ) -> TaskWorkflowResult<Task> {
        let mut task = find_task(board, id)?;
        task.transition_to(status, &*self.clock).map_err(reject)?;

        debug!(task_id = %id, %status, "changing task status");
        let updated = self
            .persist_update(board, id, &TaskPatch::status(status))
            .await?;
        board.apply(BoardEvent::StatusChanged(updated.clone()));
        Ok(updated)
    }

    /// Changes the priority of a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AssigneeRequiredForHighPriority`] when
    /// raising an unassigned task to high priority.
    pub async fn change_priority(
        &self,
        board: &mut TaskBoard,
        id: TaskId,
        priority: TaskPriority,
    ) -> TaskWorkflowResult<Task> {
        let mut task = find_task(board, id)?;
        task.change_priority(priority, &*self.clock)
            .map_err(reject)?;

        debug!(task_id = %id, %priority, "changing task priority");
        let patch = TaskPatch::new().with_priority(priority);
        let updated = self.persist_update(board, id, &patch).await?;
        board.apply(BoardEvent::TaskUpdated(updated.clone()));
        Ok(updated)
    }

    /// Changes or clears the assignee of a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::HighPriorityRequiresAssignee`] when
    /// clearing the assignee of a high-priority task.
    pub async fn change_assignee(
        &self,
        board: &mut TaskBoard,
        id: TaskId,
        assignee_id: Option<UserId>,
    ) -> TaskWorkflowResult<Task> {
        let mut task = find_task(board, id)?;
        task.change_assignee(assignee_id, &*self.clock)
            .map_err(reject)?;

        debug!(task_id = %id, "changing task assignee");
        let patch = TaskPatch::new().with_assignee(assignee_id);
        let updated = self.persist_update(board, id, &patch).await?;
        board.apply(BoardEvent::TaskUpdated(updated.clone()));
        Ok(updated)
    }

    /// Deletes a single task and its comments. The task also leaves the
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when storage fails.
    pub async fn delete_task(&self, board: &mut TaskBoard, id: TaskId) -> TaskWorkflowResult<()> {
        match self.repository.delete(id).await {
            Ok(()) => {
                info!(task_id = %id, "deleted task");
                board.apply(BoardEvent::TaskDeleted(id));
                Ok(())
            }
            Err(err) => Err(collaborator_failure(
                board,
                err,
                BoardEvent::DeleteFailed,
                "Failed to delete task",
            )),
        }
    }

    /// Deletes every selected task that is not high priority.
    ///
    /// High-priority tasks are always skipped. When nothing is deletable
    /// the command aborts without asking. Otherwise `confirmation` is asked
    /// with a prompt naming both counts; on agreement the deletable tasks
    /// are removed and the selection is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when storage fails.
    pub async fn bulk_delete(
        &self,
        board: &mut TaskBoard,
        confirmation: &impl BulkDeleteConfirmation,
    ) -> TaskWorkflowResult<BulkDeleteOutcome> {
        let plan = BulkDeletePlan::from_selection(board.tasks(), board.selection());
        if plan.is_empty() {
            return Ok(BulkDeleteOutcome::NothingSelected);
        }

        let skipped = plan.protected().len();
        if plan.deletable().is_empty() {
            warn!(skipped, "bulk delete rejected: every selected task is high priority");
            return Ok(BulkDeleteOutcome::AllProtected { skipped });
        }

        if !confirmation.confirm(&plan.confirmation_prompt()) {
            debug!("bulk delete cancelled");
            return Ok(BulkDeleteOutcome::Cancelled);
        }

        match self.repository.bulk_delete(plan.deletable()).await {
            Ok(deleted) => {
                let requested = plan.deletable().len();
                if deleted == requested {
                    info!(deleted, skipped, "bulk deleted tasks");
                } else {
                    warn!(requested, deleted, skipped, "store deleted fewer tasks than requested");
                }
                board.apply(BoardEvent::TasksDeleted(plan.deletable().to_vec()));
                Ok(BulkDeleteOutcome::Deleted { deleted, skipped })
            }
            Err(err) => Err(collaborator_failure(
                board,
                err,
                BoardEvent::DeleteFailed,
                "Failed to delete tasks",
            )),
        }
    }

    /// Moves every selected task whose transition to `target` is valid.
    ///
    /// When no selected task can move, nothing changes and the selection is
    /// kept. Otherwise the valid subset is moved, the rest is reported as
    /// skipped, and the selection is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when storage fails before
    /// any task moved; the selection is kept. When storage fails after some
    /// tasks moved, those stay moved, the selection is cleared and
    /// [`TaskWorkflowError::BulkStatusInterrupted`] carries the counts.
    pub async fn bulk_change_status(
        &self,
        board: &mut TaskBoard,
        target: TaskStatus,
    ) -> TaskWorkflowResult<BulkStatusOutcome> {
        let plan = BulkStatusPlan::from_selection(board.tasks(), board.selection(), target);
        if plan.is_empty() {
            return Ok(BulkStatusOutcome::NothingSelected);
        }

        let skipped = plan.rejected().len();
        if plan.movable().is_empty() {
            warn!(%target, rejected = skipped, "bulk status change rejected for every selected task");
            return Ok(BulkStatusOutcome::AllRejected {
                target,
                rejected: skipped,
            });
        }

        let patch = TaskPatch::status(target);
        let mut moved = 0;
        for id in plan.movable() {
            match self.persist_update(board, *id, &patch).await {
                Ok(updated) => {
                    board.apply(BoardEvent::StatusChanged(updated));
                    moved += 1;
                }
                Err(TaskWorkflowError::Repository(source)) if moved > 0 => {
                    board.apply(BoardEvent::SelectionCleared);
                    let unmoved = plan.movable().len() - moved;
                    warn!(%target, moved, unmoved, skipped, "bulk status change interrupted");
                    return Err(TaskWorkflowError::BulkStatusInterrupted {
                        outcome: BulkStatusOutcome::Applied {
                            target,
                            moved,
                            skipped,
                        },
                        unmoved,
                        source,
                    });
                }
                Err(err) => return Err(err),
            }
        }
        board.apply(BoardEvent::SelectionCleared);

        info!(%target, moved, skipped, "bulk changed task status");
        Ok(BulkStatusOutcome::Applied {
            target,
            moved,
            skipped,
        })
    }

    /// Classifies a task's due date against the current day.
    #[must_use]
    pub fn due_date_bucket(&self, task: &Task) -> DueDateBucket {
        self.config.due_date_classifier().classify(
            task.due_date(),
            task.status(),
            self.clock.local().naive_local(),
        )
    }

    async fn persist_update(
        &self,
        board: &mut TaskBoard,
        id: TaskId,
        patch: &TaskPatch,
    ) -> TaskWorkflowResult<Task> {
        self.repository.update(id, patch).await.map_err(|err| {
            collaborator_failure(board, err, BoardEvent::UpdateFailed, "Failed to update task")
        })
    }
}

fn find_task(board: &TaskBoard, id: TaskId) -> TaskWorkflowResult<Task> {
    board
        .find(id)
        .cloned()
        .ok_or(TaskWorkflowError::TaskNotFound(id))
}

fn reject(err: TaskDomainError) -> TaskWorkflowError {
    warn!(error = %err, "command rejected");
    TaskWorkflowError::Domain(err)
}

fn collaborator_failure(
    board: &mut TaskBoard,
    err: TaskRepositoryError,
    event: fn(String) -> BoardEvent,
    message: &str,
) -> TaskWorkflowError {
    warn!(error = %err, "{message}");
    board.apply(event(message.to_owned()));
    TaskWorkflowError::Repository(err)
}
