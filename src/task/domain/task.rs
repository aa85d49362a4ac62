//! Task aggregate root and the payloads used to create and edit tasks.

use super::{TaskDomainError, TaskId, TaskPriority, TaskStatus, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task title, guaranteed non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated, trimmed title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] if the title is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks the rule that a high-priority task must have an assignee.
///
/// Applied when a task is submitted through the create or edit form. Status
/// changes and bulk operations do not re-check it.
///
/// # Errors
///
/// Returns [`TaskDomainError::HighPriorityWithoutAssignee`] when `priority`
/// is high and `assignee_id` is `None`.
pub const fn check_priority_assignee(
    priority: TaskPriority,
    assignee_id: Option<UserId>,
) -> Result<(), TaskDomainError> {
    if priority.is_high() && assignee_id.is_none() {
        return Err(TaskDomainError::HighPriorityWithoutAssignee);
    }
    Ok(())
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    assignee_id: Option<UserId>,
    due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted assignee, if any.
    pub assignee_id: Option<UserId>,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assignee_id: data.assignee_id,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `next`, refreshing `updated_at`.
    ///
    /// Moving to the current status succeeds and only refreshes the
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the workflow
    /// forbids the move. The task is left untouched.
    pub fn transition_to(
        &mut self,
        next: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(next) {
            return Err(TaskDomainError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.touch(clock);
        Ok(())
    }

    /// Changes the priority interactively.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AssigneeRequiredForHighPriority`] when
    /// raising an unassigned task to high priority.
    pub fn change_priority(
        &mut self,
        priority: TaskPriority,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if priority.is_high() && self.assignee_id.is_none() {
            return Err(TaskDomainError::AssigneeRequiredForHighPriority);
        }
        self.priority = priority;
        self.touch(clock);
        Ok(())
    }

    /// Changes or clears the assignee interactively.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::HighPriorityRequiresAssignee`] when
    /// clearing the assignee of a high-priority task.
    pub fn change_assignee(
        &mut self,
        assignee_id: Option<UserId>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if assignee_id.is_none() && self.priority.is_high() {
            return Err(TaskDomainError::HighPriorityRequiresAssignee);
        }
        self.assignee_id = assignee_id;
        self.touch(clock);
        Ok(())
    }

    /// Applies a partial update without validation and refreshes
    /// `updated_at`.
    ///
    /// This is the storage-side merge; form-level rules are checked by the
    /// caller before the patch is submitted.
    pub fn apply_patch(&mut self, patch: &TaskPatch, clock: &impl Clock) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(assignee_id) = patch.assignee_id {
            self.assignee_id = assignee_id;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Task payload submitted for creation, before the persistence layer
/// assigns an identifier and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    title: TaskTitle,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    assignee_id: Option<UserId>,
    due_date: Option<NaiveDate>,
}

impl NewTask {
    /// Creates a `todo`, medium-priority task payload with the given title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] if the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: TaskTitle::new(title)?,
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::default(),
            assignee_id: None,
            due_date: None,
        })
    }

    /// Sets the description, trimmed.
    #[must_use]
    pub fn with_description(mut self, description: impl AsRef<str>) -> Self {
        description.as_ref().trim().clone_into(&mut self.description);
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
    pub const fn with_assignee(mut self, assignee_id: Option<UserId>) -> Self {
        self.assignee_id = assignee_id;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Checks submission rules that span several fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::HighPriorityWithoutAssignee`] for a
    /// high-priority payload without an assignee.
    pub const fn validate(&self) -> Result<(), TaskDomainError> {
        check_priority_assignee(self.priority, self.assignee_id)
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Materializes the payload into a task with the storage-assigned
    /// identifier and timestamp.
    #[must_use]
    pub fn into_task(self, id: TaskId, timestamp: DateTime<Utc>) -> Task {
        Task::from_persisted(PersistedTaskData {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            assignee_id: self.assignee_id,
            due_date: self.due_date,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }
}

/// Partial update of task fields. `None` leaves a field unchanged.
///
/// For the nullable fields, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    assignee_id: Option<Option<UserId>>,
    due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a patch that only changes the status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self::new().with_status(status)
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the description, trimmed.
    #[must_use]
    pub fn with_description(mut self, description: impl AsRef<str>) -> Self {
        self.description = Some(description.as_ref().trim().to_owned());
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

    /// Returns the status this patch sets, if any.
    #[must_use]
    pub const fn status_change(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee_id.is_none()
            && self.due_date.is_none()
    }

    /// Checks the high-priority assignee rule against the fields `task`
    /// would have after this patch is applied.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::HighPriorityWithoutAssignee`] when the
    /// patched task would be high priority without an assignee.
    pub fn validate_against(&self, task: &Task) -> Result<(), TaskDomainError> {
        let priority = self.priority.unwrap_or(task.priority());
        let assignee_id = self.assignee_id.unwrap_or(task.assignee_id());
        check_priority_assignee(priority, assignee_id)
    }
}
